//! HTTP server for the interactive dashboard
//!
//! `trackboard serve` → loads the dataset, starts the server, opens the browser.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | the dashboard page |
//! | `GET /api/options` | sidebar choices |
//! | `GET/POST /api/view` | full view model for a selection |

use crate::dataset::{Dataset, DatasetCache, LoadError};
use crate::filter::{FilterOptions, FilterSelection};
use crate::{page, view};
use serde::Serialize;
use std::sync::Arc;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{error, info, warn};

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(message: impl Into<String>) -> Self {
        Self { ok: false, data: None, error: Some(message.into()) }
    }
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            open_browser: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },
}

/// A routed reply, before it is turned into a tiny_http response
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status, content_type: "application/json", body },
            Err(e) => Self {
                status: 500,
                content_type: "text/plain; charset=utf-8",
                body: format!("serialization failed: {}", e),
            },
        }
    }

    fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain; charset=utf-8", body: "Not found".to_string() }
    }
}

/// Load the dataset, then serve until the process is stopped.
///
/// The dataset is loaded before the port is bound, so a missing or broken
/// file aborts startup instead of serving a partial page.
pub fn start(cache: DatasetCache, config: &ServeConfig) -> Result<(), ServeError> {
    let dataset = cache.get()?;

    let addr = format!("{}:{}", config.host, config.port);
    let server = Server::http(&addr).map_err(|e| ServeError::Bind {
        addr: addr.clone(),
        message: e.to_string(),
    })?;

    let url = format!("http://{}:{}", display_host(&config.host), config.port);

    eprintln!("\n\x1b[1;32m{} {}\x1b[0m", page::PAGE_ICON, page::PAGE_TITLE);
    eprintln!("   {}", url);
    eprintln!("   Data: {} ({} tracks)\n", cache.path().display(), dataset.len());
    info!(%addr, tracks = dataset.len(), "dashboard listening");

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            warn!(error = %e, "could not open browser");
        }
    }

    // Every request renders from this one loaded dataset
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &dataset) {
            error!(error = %e, "failed to respond");
        }
    }

    Ok(())
}

fn display_host(host: &str) -> &str {
    match host {
        "127.0.0.1" | "0.0.0.0" => "localhost",
        other => other,
    }
}

fn handle_request(mut request: Request, dataset: &Arc<Dataset>) -> std::io::Result<()> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = String::new();
    if method == Method::Post {
        request.as_reader().read_to_string(&mut body)?;
    }

    let reply = route(&method, &url, &body, dataset);
    info!(method = %method, url = %url, status = reply.status, "request");

    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header"))?;
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header);
    request.respond(response)
}

/// Map a request to its reply. Does no I/O.
pub fn route(method: &Method, url: &str, body: &str, dataset: &Dataset) -> Reply {
    let path = url.split('?').next().unwrap_or("/");

    match (method, path) {
        (&Method::Get, "/") => Reply::html(page::live_html()),

        (&Method::Get, "/api/options") => {
            Reply::json(200, &ApiResponse::success(FilterOptions::from_dataset(dataset)))
        }

        (&Method::Get, "/api/view") | (&Method::Post, "/api/view") => {
            match parse_selection(url, body) {
                Ok(selection) => {
                    Reply::json(200, &ApiResponse::success(view::render(dataset, &selection)))
                }
                Err(message) => Reply::json(400, &ApiResponse::failure(message)),
            }
        }

        _ => Reply::not_found(),
    }
}

/// Selection from the query string, else a JSON body, else unconstrained
fn parse_selection(url: &str, body: &str) -> Result<FilterSelection, String> {
    if let Some(query) = url.split_once('?').map(|(_, q)| q).filter(|q| !q.is_empty()) {
        return FilterSelection::from_query(query).map_err(|e| format!("invalid query: {}", e));
    }

    if !body.trim().is_empty() {
        return FilterSelection::from_json(body).map_err(|e| format!("invalid selection: {}", e));
    }

    Ok(FilterSelection::default())
}
