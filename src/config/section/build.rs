//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"       # bundle output directory
//! public = "public"     # unbundled static files, served at /
//! entry = "index.html"  # SPA entry document
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// Bundle settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Bundle output directory, relative to the project root.
    pub output: PathBuf,

    /// Static files copied verbatim into the bundle and served at `/`.
    pub public: PathBuf,

    /// SPA entry document, copied into the bundle root.
    pub entry: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            public: PathBuf::from("public"),
            entry: PathBuf::from("index.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::test_parse_config;

    #[test]
    fn test_build_config() {
        let config = test_parse_config("[build]\noutput = \"out\"");
        assert_eq!(config.build.output, PathBuf::from("out"));
        assert_eq!(config.build.public, PathBuf::from("public"));
    }

    #[test]
    fn test_build_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.public, PathBuf::from("public"));
        assert_eq!(config.build.entry, PathBuf::from("index.html"));
    }
}
