//! Application configuration for `memeboard.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[serve]`  | HTTP server (interface, port)                  |
//! | `[assets]` | Asset mount and template library location      |
//! | `[build]`  | Bundle output, public files, SPA entry         |
//!
//! The config file is optional; when absent, all defaults apply. Overrides
//! are layered in `finalize`: `--port` beats the `PORT` environment variable,
//! which beats `[serve] port`.

mod error;
pub mod section;

pub use error::ConfigError;

use section::{AssetsConfig, BuildConfig, ServeConfig};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing memeboard.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// HTTP server settings
    pub serve: ServeConfig,

    /// Asset directory settings
    pub assets: AssetsConfig,

    /// Bundle settings
    pub build: BuildConfig,
}

impl AppConfig {
    /// Load configuration from CLI arguments.
    ///
    /// The project root is the parent of the config file; a missing config
    /// file means defaults, rooted at the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current working directory")?;
        let config_path = cwd.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "'{}' not found, using defaults", cli.config.display());
            Self::default()
        };

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(cli);
        Ok(config)
    }

    /// Load configuration from file path.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let config = toml::from_str(&content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Apply CLI and environment overrides after loading.
    fn finalize(&mut self, cli: &Cli) {
        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            self.serve.port =
                resolve_port(*port, env::var("PORT").ok().as_deref(), self.serve.port);
        }
    }

    // ------------------------------------------------------------------
    // Path and prefix helpers
    // ------------------------------------------------------------------

    /// Asset directory on disk (mounted at `/<assets.dir>`).
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.assets.dir)
    }

    /// Meme template library directory on disk.
    pub fn meme_dir(&self) -> PathBuf {
        self.assets_dir().join(&self.assets.meme_base)
    }

    /// HTTP prefix for template paths in API responses.
    pub fn meme_url_prefix(&self) -> String {
        format!("/{}/{}", self.assets.dir, self.assets.meme_base)
    }

    /// Module-relative prefix for template paths in the generated module.
    pub fn meme_module_prefix(&self) -> String {
        format!("./{}/{}", self.assets.dir, self.assets.meme_base)
    }

    /// Bundle output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Unbundled static file directory, served at `/`.
    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.build.public)
    }

    /// SPA entry document at the project root (unbundled fallback).
    pub fn entry_file(&self) -> PathBuf {
        self.root.join(&self.build.entry)
    }
}

/// Resolve the listen port: `--port` flag > `PORT` env var > configured port.
///
/// A non-numeric `PORT` value is reported and ignored rather than aborting
/// startup.
fn resolve_port(cli_port: Option<u16>, env_port: Option<&str>, configured: u16) -> u16 {
    if let Some(port) = cli_port {
        return port;
    }
    let Some(raw) = env_port else {
        return configured;
    };
    match raw.trim().parse() {
        Ok(port) => port,
        Err(_) => {
            log!("config"; "ignoring non-numeric PORT value '{}'", raw);
            configured
        }
    }
}

/// Parse configuration from a TOML string (test helper).
#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> AppConfig {
    toml::from_str(content).expect("test config should parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_resolution_order() {
        // CLI flag wins over everything
        assert_eq!(resolve_port(Some(4000), Some("5000"), 3000), 4000);
        // Env var wins over configured port
        assert_eq!(resolve_port(None, Some("5000"), 3000), 5000);
        // Nothing set: configured port (default 3000)
        assert_eq!(resolve_port(None, None, 3000), 3000);
    }

    #[test]
    fn test_port_env_invalid_falls_back() {
        assert_eq!(resolve_port(None, Some("not-a-port"), 3000), 3000);
        assert_eq!(resolve_port(None, Some(""), 8080), 8080);
    }

    #[test]
    fn test_prefix_helpers() {
        let config = test_parse_config("");
        assert_eq!(config.meme_url_prefix(), "/assets/meme-base");
        assert_eq!(config.meme_module_prefix(), "./assets/meme-base");
    }

    #[test]
    fn test_path_helpers_join_root() {
        let mut config = test_parse_config("");
        config.root = PathBuf::from("/srv/app");
        assert_eq!(config.meme_dir(), PathBuf::from("/srv/app/assets/meme-base"));
        assert_eq!(config.output_dir(), PathBuf::from("/srv/app/dist"));
        assert_eq!(config.entry_file(), PathBuf::from("/srv/app/index.html"));
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let config = test_parse_config("[serve]\nport = 8080\nfuture_knob = true");
        assert_eq!(config.serve.port, 8080);
    }
}
