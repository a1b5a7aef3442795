//! JSON API routes.

use super::response;
use crate::{config::AppConfig, listing, log};
use anyhow::Result;
use serde_json::json;
use tiny_http::Request;

/// `GET /api/meme-list`: the template listing, scanned fresh per request.
pub fn respond_meme_list(request: Request, config: &AppConfig) -> Result<()> {
    match listing::scan_meme_dir(&config.meme_dir(), &config.meme_url_prefix()) {
        Ok(entries) => {
            let body = serde_json::to_vec(&entries)?;
            response::respond_json(request, 200, body)
        }
        Err(e) => {
            log!("api"; "failed to read template library: {:#}", e);
            let body = serde_json::to_vec(&json!({"error": "Failed to read meme library"}))?;
            response::respond_json(request, 500, body)
        }
    }
}

/// `GET /api/memes`: permanently empty, kept for front-end compatibility.
pub fn respond_memes_stub(request: Request) -> Result<()> {
    response::respond_json(request, 200, b"[]".to_vec())
}
