//! URL to filesystem path resolution.

use crate::config::AppConfig;
use std::path::{Path, PathBuf};

/// Strip the query string from a request URL.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Resolve URL to a static file, trying each serve root in order:
/// `public/`, the bundle output, then the `/<assets.dir>` mount.
pub fn resolve_static(url: &str, config: &AppConfig) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    for root in [config.public_dir(), config.output_dir()] {
        if let Some(path) = resolve_in_root(&clean, &root) {
            return Some(path);
        }
    }

    // The assets mount works like the other roots, minus the mount segment
    let mount = format!("{}/", config.assets.dir);
    if let Some(rest) = clean.strip_prefix(&mount) {
        return resolve_in_root(rest, &config.assets_dir());
    }

    None
}

/// Entry document for the SPA fallback: bundled copy first, then the
/// project-root source document.
pub fn spa_entry(config: &AppConfig) -> Option<PathBuf> {
    let file_name = config.build.entry.file_name()?;

    let bundled = config.output_dir().join(file_name);
    if bundled.is_file() {
        return Some(bundled);
    }

    let unbundled = config.entry_file();
    unbundled.is_file().then_some(unbundled)
}

/// Resolve a cleaned relative URL inside one serve root, handling
/// index.html for directories.
fn resolve_in_root(clean: &str, root: &Path) -> Option<PathBuf> {
    let local = root.join(clean);

    // Canonicalize to resolve symlinks and verify path is under the root
    // This prevents traversal via symlinks or encoded sequences
    let canonical = local.canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        // Path escapes the serve root - reject
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    /// Default-config app rooted at a fresh temp directory.
    fn test_app() -> (TempDir, AppConfig) {
        let temp = TempDir::new().unwrap();
        let mut config = test_parse_config("");
        config.root = temp.path().to_path_buf();
        (temp, config)
    }

    #[test]
    fn public_root_is_tried_first() {
        let (temp, config) = test_app();
        fs::create_dir_all(temp.path().join("public")).unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("public/app.js"), "public").unwrap();
        fs::write(temp.path().join("dist/app.js"), "dist").unwrap();

        let resolved = resolve_static("/app.js", &config).unwrap();
        assert_eq!(fs::read_to_string(resolved).unwrap(), "public");
    }

    #[test]
    fn bundle_root_serves_generated_module() {
        let (temp, config) = test_app();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/meme-list.js"), "export default [];").unwrap();

        let resolved = resolve_static("/meme-list.js", &config).unwrap();
        assert!(resolved.ends_with("dist/meme-list.js"));
    }

    #[test]
    fn assets_mount_maps_into_assets_dir() {
        let (temp, config) = test_app();
        fs::create_dir_all(temp.path().join("assets/meme-base")).unwrap();
        fs::write(temp.path().join("assets/meme-base/a.png"), "img").unwrap();

        let resolved = resolve_static("/assets/meme-base/a.png", &config).unwrap();
        assert!(resolved.ends_with("assets/meme-base/a.png"));
    }

    #[test]
    fn query_strings_are_ignored() {
        let (temp, config) = test_app();
        fs::create_dir_all(temp.path().join("public")).unwrap();
        fs::write(temp.path().join("public/style.css"), "css").unwrap();

        assert!(resolve_static("/style.css?v=2", &config).is_some());
    }

    #[test]
    fn traversal_is_rejected() {
        let (temp, config) = test_app();
        fs::create_dir_all(temp.path().join("public")).unwrap();
        fs::write(temp.path().join("secret.txt"), "nope").unwrap();

        assert!(resolve_static("/../secret.txt", &config).is_none());
        assert!(resolve_static("/%2e%2e/secret.txt", &config).is_none());
    }

    #[test]
    fn directories_resolve_to_index_html() {
        let (temp, config) = test_app();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/index.html"), "<html>").unwrap();

        let resolved = resolve_static("/", &config).unwrap();
        assert!(resolved.ends_with("dist/index.html"));
    }

    #[test]
    fn spa_entry_prefers_bundled_document() {
        let (temp, config) = test_app();
        fs::write(temp.path().join("index.html"), "source").unwrap();

        // No bundle yet: the source document is the fallback
        let entry = spa_entry(&config).unwrap();
        assert_eq!(fs::read_to_string(&entry).unwrap(), "source");

        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/index.html"), "bundled").unwrap();
        let entry = spa_entry(&config).unwrap();
        assert_eq!(fs::read_to_string(&entry).unwrap(), "bundled");
    }

    #[test]
    fn strip_query_keeps_route() {
        assert_eq!(strip_query("/api/meme-list?x=1"), "/api/meme-list");
        assert_eq!(strip_query("/api/memes"), "/api/memes");
    }
}
