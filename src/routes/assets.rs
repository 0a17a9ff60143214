//! Static asset routes: CV download, projects page, visit tracking

use hyper::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::routes::{full_body, json_response, BoxBody, MessageResponse};
use crate::server::AppState;

/// GET /api/cv - serve the CV as a binary download with a fixed filename
pub async fn handle_cv_download(state: Arc<AppState>) -> hyper::Response<BoxBody> {
    match tokio::fs::read(&state.args.cv_path).await {
        Ok(bytes) => hyper::Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/pdf")
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", state.args.cv_filename),
            )
            .header("Access-Control-Allow-Origin", "*")
            .body(full_body(bytes))
            .unwrap(),
        Err(e) => {
            error!("Error downloading CV from {}: {}", state.args.cv_path, e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &MessageResponse::new("Internal server error while downloading CV"),
            )
        }
    }
}

/// GET /api/routes/projects - serve the static projects listing page
pub async fn handle_projects_page(state: Arc<AppState>) -> hyper::Response<BoxBody> {
    match tokio::fs::read(&state.args.projects_page).await {
        Ok(bytes) => hyper::Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/html; charset=utf-8")
            .header("Access-Control-Allow-Origin", "*")
            .body(full_body(bytes))
            .unwrap(),
        Err(e) => {
            error!(
                "Error serving projects page from {}: {}",
                state.args.projects_page, e
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &MessageResponse::new("Internal server error while serving projects page"),
            )
        }
    }
}

/// GET /api/assets/* - serve a file from the assets directory.
///
/// Paths are resolved strictly inside the configured directory; any empty,
/// `.`, or `..` segment is refused before touching the filesystem.
pub async fn handle_asset(state: Arc<AppState>, rest: &str) -> hyper::Response<BoxBody> {
    let rest = urlencoding::decode(rest)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| rest.to_string());

    if rest.is_empty()
        || rest.contains('\\')
        || rest.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return asset_not_found(&rest);
    }

    let path = std::path::Path::new(&state.args.assets_dir).join(&rest);
    match tokio::fs::read(&path).await {
        Ok(bytes) => hyper::Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", asset_content_type(&rest))
            .header("Access-Control-Allow-Origin", "*")
            .body(full_body(bytes))
            .unwrap(),
        Err(_) => asset_not_found(&rest),
    }
}

fn asset_not_found(rest: &str) -> hyper::Response<BoxBody> {
    info!("Asset not found: {}", rest);
    json_response(
        StatusCode::NOT_FOUND,
        &MessageResponse::new("Asset not found"),
    )
}

/// Content type from the file extension, octet-stream when unknown
fn asset_content_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Deserialize)]
struct TrackQuery {
    #[serde(default)]
    url: Option<String>,
}

/// GET /api/routes/track-visited?url= - log the visited URL and discard it.
///
/// No storage, no aggregation; the log line is the only effect.
pub async fn handle_track_visited(query: Option<&str>) -> hyper::Response<BoxBody> {
    let visited = query
        .and_then(|q| serde_urlencoded::from_str::<TrackQuery>(q).ok())
        .and_then(|t| t.url);

    info!(url = ?visited, "Visit tracked");

    json_response(
        StatusCode::OK,
        &MessageResponse::new("Visited tracked successfully"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_state() -> Arc<AppState> {
        use clap::Parser;
        let mut args = crate::config::Args::parse_from(["vitrine", "--dev-mode"]);
        args.assets_dir = "assets".to_string();
        Arc::new(AppState::new(args, None, None))
    }

    #[test]
    fn serves_existing_asset_with_content_type() {
        let response = tokio_test::block_on(handle_asset(asset_state(), "projects.html"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn traversal_segments_are_refused() {
        for bad in ["../Cargo.toml", "..%2FCargo.toml", "a/../../Cargo.toml", "", "./x"] {
            let response = tokio_test::block_on(handle_asset(asset_state(), bad));
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn missing_asset_is_not_found() {
        let response = tokio_test::block_on(handle_asset(asset_state(), "no-such-file.css"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(asset_content_type("logo.png"), "image/png");
        assert_eq!(asset_content_type("cv.pdf"), "application/pdf");
        assert_eq!(asset_content_type("blob"), "application/octet-stream");
    }

    #[test]
    fn track_query_parses_url() {
        let parsed: TrackQuery =
            serde_urlencoded::from_str("url=https%3A%2F%2Fexample.com%2Fhome").unwrap();
        assert_eq!(parsed.url.as_deref(), Some("https://example.com/home"));
    }

    #[test]
    fn track_query_tolerates_missing_url() {
        let parsed: TrackQuery = serde_urlencoded::from_str("").unwrap();
        assert!(parsed.url.is_none());
    }

    #[test]
    fn track_visited_always_acknowledges() {
        let response = tokio_test::block_on(handle_track_visited(Some("url=https://example.com")));
        assert_eq!(response.status(), StatusCode::OK);

        let response = tokio_test::block_on(handle_track_visited(None));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
