//! HTTP routes for Vitrine

pub mod assets;
pub mod contact;
pub mod health;
pub mod login;
pub mod projects;
pub mod reviews;

pub use assets::{handle_asset, handle_cv_download, handle_projects_page, handle_track_visited};
pub use contact::handle_contact;
pub use health::{health_check, version_info};
pub use login::{handle_login_get, handle_login_post};
pub use projects::{
    handle_get_project, handle_get_project_by_external_id, handle_list_projects,
    handle_list_projects_by_category,
};
pub use reviews::{handle_list_reviews, handle_submit_review};

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::ApiError;

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Largest request body any route accepts
const MAX_BODY_BYTES: usize = 10240;

/// JSON body shape used for acknowledgments and error responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .body(full_body(json))
        .unwrap()
}

/// Map a handler error to an HTTP response.
///
/// Client-caused errors (validation, not-found, unauthorized, config) carry
/// their own message. Store/mail/internal failures are logged and answered
/// with the route's generic message so internals never leak to the caller.
pub fn error_response(err: ApiError, fallback: &str) -> Response<BoxBody> {
    if err.is_client_safe() {
        json_response(err.status(), &MessageResponse::new(err.to_string()))
    } else {
        error!("{}: {}", fallback, err);
        json_response(err.status(), &MessageResponse::new(fallback))
    }
}

pub fn cors_preflight() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

pub fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

pub async fn parse_json_body<T, B>(req: Request<B>) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // Limit enforced while reading, so an oversized body is never buffered
    let body = Limited::new(req.into_body(), MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                ApiError::Validation("Request body too large".into())
            } else {
                ApiError::Validation(format!("Failed to read body: {}", e))
            }
        })?;

    serde_json::from_slice(&body.to_bytes())
        .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_request(body: String) -> Request<Full<Bytes>> {
        Request::builder()
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    #[test]
    fn parses_valid_json() {
        let req = json_request(r#"{"password":"abc123"}"#.to_string());
        let parsed: serde_json::Value = tokio_test::block_on(parse_json_body(req)).unwrap();
        assert_eq!(parsed["password"], "abc123");
    }

    #[test]
    fn oversized_body_rejected_before_parsing() {
        let body = format!(r#"{{"comment":"{}"}}"#, "x".repeat(2 * MAX_BODY_BYTES));
        let err = tokio_test::block_on(parse_json_body::<serde_json::Value, _>(
            json_request(body),
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "Request body too large");
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        let err = tokio_test::block_on(parse_json_body::<serde_json::Value, _>(
            json_request("not json".to_string()),
        ))
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON body"));
    }
}
