//! `[assets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! dir = "assets"          # directory mounted at /<dir> by the server
//! meme_base = "meme-base" # subdirectory of `dir` holding the template library
//! ```

use serde::Deserialize;

/// Asset directory settings.
///
/// `dir` doubles as the URL mount segment, so it is a single path component
/// rather than an arbitrary path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served under `/<dir>`, relative to the project root.
    pub dir: String,

    /// Subdirectory of `dir` containing the meme templates.
    pub meme_base: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: "assets".to_string(),
            meme_base: "meme-base".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_assets_config() {
        let config = test_parse_config("[assets]\ndir = \"static\"\nmeme_base = \"templates\"");
        assert_eq!(config.assets.dir, "static");
        assert_eq!(config.assets.meme_base, "templates");
    }

    #[test]
    fn test_assets_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.assets.dir, "assets");
        assert_eq!(config.assets.meme_base, "meme-base");
    }
}
