//! Bundle the front end: static module generation plus file copying.

use crate::{config::AppConfig, debug, listing, log};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Name of the generated listing module inside the bundle.
pub const MEME_MODULE_NAME: &str = "meme-list.js";

/// Entry point for `memeboard build`.
pub fn build_bundle(config: &AppConfig, clean: bool) -> Result<()> {
    let output = config.output_dir();

    if clean && output.exists() {
        fs::remove_dir_all(&output)
            .with_context(|| format!("Failed to clean '{}'", output.display()))?;
    }
    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create '{}'", output.display()))?;

    write_meme_module(config, &output)?;
    copy_entry(config, &output)?;
    copy_tree(&config.public_dir(), &output)?;
    copy_tree(&config.assets_dir(), &output.join(&config.assets.dir))?;

    log!("build"; "bundle written to {}", output.display());
    Ok(())
}

/// Write the statically generated counterpart of `GET /api/meme-list`.
///
/// A failed scan degrades to an empty module so a broken library directory
/// does not break the bundle.
fn write_meme_module(config: &AppConfig, output: &Path) -> Result<()> {
    let source = match listing::scan_meme_dir(&config.meme_dir(), &config.meme_module_prefix()) {
        Ok(entries) => {
            debug!("build"; "listed {} template(s)", entries.len());
            meme_module_source(&serde_json::to_string(&entries)?)
        }
        Err(e) => {
            log!("build"; "failed to read template library: {:#}", e);
            meme_module_source("[]")
        }
    };

    let path = output.join(MEME_MODULE_NAME);
    fs::write(&path, source).with_context(|| format!("Failed to write '{}'", path.display()))
}

fn meme_module_source(json: &str) -> String {
    format!("export default {json};\n")
}

/// Copy the SPA entry document into the bundle root.
fn copy_entry(config: &AppConfig, output: &Path) -> Result<()> {
    let entry = config.entry_file();
    if !entry.is_file() {
        log!("build"; "entry document '{}' not found, skipping", entry.display());
        return Ok(());
    }

    let Some(file_name) = entry.file_name() else {
        return Ok(());
    };
    fs::copy(&entry, output.join(file_name))
        .with_context(|| format!("Failed to copy '{}'", entry.display()))?;
    Ok(())
}

/// Recursively copy a directory tree. A missing source is skipped.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        debug!("build"; "'{}' not found, skipping", from.display());
        return Ok(());
    }

    fs::create_dir_all(to).with_context(|| format!("Failed to create '{}'", to.display()))?;

    let read_dir =
        fs::read_dir(from).with_context(|| format!("Failed to read '{}'", from.display()))?;
    for entry in read_dir {
        let entry = entry.with_context(|| format!("Failed to read entry in '{}'", from.display()))?;
        let path = entry.path();
        let dest = to.join(entry.file_name());
        if path.is_dir() {
            copy_tree(&path, &dest)?;
        } else {
            fs::copy(&path, &dest)
                .with_context(|| format!("Failed to copy '{}'", path.display()))?;
        }
    }
    Ok(())
}
