//! Meme template listing (pure, no side effects).
//!
//! Both lifecycles go through [`scan_meme_dir`]: the HTTP handler passes the
//! `/assets/...` mount as prefix, the bundler passes a module-relative prefix.
//! Keeping a single scan function guarantees the API response and the
//! generated `meme-list.js` module can never disagree on order or labels.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Image extensions recognized as meme templates (matched case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["webp", "jpg", "jpeg", "png"];

/// One discoverable meme template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemeEntry {
    /// Display label, `"Item N"` with N the 1-based position in sorted order.
    pub name: String,
    /// Client-reachable location: `prefix + "/" + filename`.
    pub path: String,
    /// Raw directory entry name, unmodified.
    pub filename: String,
}

/// Scan a template directory into an ordered entry list.
///
/// A missing directory is an empty library, not an error. Any other read
/// failure propagates to the caller.
///
/// # Pure Function
///
/// This function only reads the filesystem and returns data.
/// It does not modify any state.
pub fn scan_meme_dir(dir: &Path, prefix: &str) -> Result<Vec<MemeEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let read_dir = fs::read_dir(dir)
        .with_context(|| format!("Failed to read template directory '{}'", dir.display()))?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.with_context(|| {
            format!("Failed to read entry in '{}'", dir.display())
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if has_image_extension(&name) {
            names.push(name);
        }
    }

    // Plain byte-wise sort: positions and labels both come from this order
    names.sort();

    let prefix = prefix.trim_end_matches('/');
    Ok(names
        .into_iter()
        .enumerate()
        .map(|(index, filename)| MemeEntry {
            name: format!("Item {}", index + 1),
            path: format!("{prefix}/{filename}"),
            filename,
        })
        .collect())
}

/// Check whether a filename carries one of the recognized image extensions.
fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
