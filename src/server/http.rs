//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Pure dispatch on
//! (method, path); no middleware, no auth gating outside the login routes.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::db::MongoClient;
use crate::error::ApiError;
use crate::mail::ContactTransport;
use crate::routes::{self, cors_preflight, json_response, BoxBody, MessageResponse};

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub mongo: Option<MongoClient>,
    pub mailer: Option<Arc<dyn ContactTransport>>,
}

impl AppState {
    pub fn new(
        args: Args,
        mongo: Option<MongoClient>,
        mailer: Option<Arc<dyn ContactTransport>>,
    ) -> Self {
        Self {
            args,
            mongo,
            mailer,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), ApiError> {
    let listener = TcpListener::bind(state.args.listen)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to bind {}: {}", state.args.listen, e)))?;

    info!("Vitrine listening on {}", state.args.listen);

    if state.args.dev_mode {
        warn!("Development mode enabled - MongoDB and SMTP are optional");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Root banner
        (Method::GET, "/") => json_response(
            StatusCode::OK,
            &MessageResponse::new("API server is running"),
        ),

        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state))
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // CORS preflight
        (Method::OPTIONS, _) => cors_preflight(),

        // Contact form
        (Method::POST, "/api/contact") => routes::handle_contact(req, Arc::clone(&state)).await,

        // CV download
        (Method::GET, "/api/cv") => routes::handle_cv_download(Arc::clone(&state)).await,

        // Static assets
        (Method::GET, p) if p.starts_with("/api/assets/") => {
            let rest = p.strip_prefix("/api/assets/").unwrap_or("");
            routes::handle_asset(Arc::clone(&state), rest).await
        }

        // Static projects listing page
        (Method::GET, "/api/routes/projects") => {
            routes::handle_projects_page(Arc::clone(&state)).await
        }

        // Visit tracking: log the url query parameter, nothing else
        (Method::GET, "/api/routes/track-visited") => {
            routes::handle_track_visited(query.as_deref()).await
        }

        // Path-based login
        (Method::GET, p) if p.starts_with("/api/routes/login/") => {
            let password = p.strip_prefix("/api/routes/login/").unwrap_or("");
            routes::handle_login_get(Arc::clone(&state), password).await
        }

        // Body-based login
        (Method::POST, "/api/routes/login") => {
            routes::handle_login_post(req, Arc::clone(&state)).await
        }

        // Project queries - literal segments before the :id catch-all
        (Method::GET, "/api/projects") => routes::handle_list_projects(Arc::clone(&state)).await,
        (Method::GET, p) if p.starts_with("/api/projects/projectid/") => {
            let project_id = p.strip_prefix("/api/projects/projectid/").unwrap_or("");
            routes::handle_get_project_by_external_id(Arc::clone(&state), project_id).await
        }
        (Method::GET, p) if p.starts_with("/api/projects/category/") => {
            let category = p.strip_prefix("/api/projects/category/").unwrap_or("");
            routes::handle_list_projects_by_category(Arc::clone(&state), category).await
        }
        (Method::GET, p) if p.starts_with("/api/projects/") => {
            let id = p.strip_prefix("/api/projects/").unwrap_or("");
            routes::handle_get_project(Arc::clone(&state), id).await
        }

        // Reviews
        (Method::POST, "/api/review") => {
            routes::handle_submit_review(req, Arc::clone(&state)).await
        }
        (Method::GET, p) if p.starts_with("/api/reviews/") => {
            let project_id = p.strip_prefix("/api/reviews/").unwrap_or("");
            routes::handle_list_reviews(Arc::clone(&state), project_id).await
        }

        // Not found
        _ => not_found_response(&path),
    };

    Ok(response)
}

/// Not found response
fn not_found_response(path: &str) -> Response<BoxBody> {
    let body = serde_json::json!({
        "message": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(routes::full_body(body.to_string()))
        .unwrap()
}
