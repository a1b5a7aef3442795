//! HTTP server: listing API, static files, SPA fallback.

mod api;
mod path;
mod response;

use crate::{config::AppConfig, core, log};
use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Entry point for `memeboard serve`.
pub fn serve_app(config: AppConfig) -> Result<()> {
    bind_server(Arc::new(config))?.run()
}

/// Bound server ready to accept requests
struct BoundServer {
    server: Arc<Server>,
    config: Arc<AppConfig>,
}

/// Bind the HTTP server without starting the request loop
fn bind_server(config: Arc<AppConfig>) -> Result<BoundServer> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    core::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    log!("serve"; "template library: {}", config.meme_dir().display());

    Ok(BoundServer { server, config })
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

impl BoundServer {
    /// Start the request loop (blocking).
    fn run(self) -> Result<()> {
        // Use thread pool to handle requests concurrently
        // This keeps a slow filesystem read from blocking other requests
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .expect("failed to create thread pool");

        for request in self.server.incoming_requests() {
            let config = Arc::clone(&self.config);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &config) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &AppConfig) -> Result<()> {
    // Early exit if shutdown requested
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    // Every route, the SPA catch-all included, is GET/HEAD only
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_not_found(request);
    }

    // API routes first, then static roots, mirroring the middleware order
    // of the front end's dev server
    match path::strip_query(request.url()) {
        "/api/meme-list" => return api::respond_meme_list(request, config),
        "/api/memes" => return api::respond_memes_stub(request),
        _ => {}
    }

    if let Some(file) = path::resolve_static(request.url(), config) {
        return response::respond_file(request, &file);
    }

    // SPA fallback: bundled entry document, else the unbundled source entry
    if let Some(entry) = path::spa_entry(config) {
        return response::respond_file(request, &entry);
    }

    response::respond_not_found(request)
}
