//! Login routes
//!
//! Two variants share the same comparison and token logic: GET with the
//! password as a path segment, and POST with a JSON body.

use hyper::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::auth::{issue_token, verify_password};
use crate::error::ApiError;
use crate::routes::{error_response, json_response, parse_json_body, BoxBody};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: String,
    token: String,
}

fn attempt(state: &AppState, password: &str) -> Result<String, ApiError> {
    verify_password(&state.args, password).map_err(|err| {
        if matches!(err, ApiError::Config(_)) {
            warn!("Login attempted but no admin password is configured");
            ApiError::Config("Server configuration error".into())
        } else {
            err
        }
    })?;
    issue_token(&state.args)
}

fn login_result(result: Result<String, ApiError>) -> hyper::Response<BoxBody> {
    match result {
        Ok(token) => json_response(
            StatusCode::OK,
            &LoginResponse {
                message: "Login successful".to_string(),
                token,
            },
        ),
        Err(err) => error_response(err, "Internal server error during login"),
    }
}

/// GET /api/routes/login/:password - path-based login
pub async fn handle_login_get(state: Arc<AppState>, password: &str) -> hyper::Response<BoxBody> {
    // Path segments arrive percent-encoded
    let password = urlencoding::decode(password)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| password.to_string());

    login_result(attempt(&state, &password))
}

/// POST /api/routes/login - body-based login
pub async fn handle_login_post(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> hyper::Response<BoxBody> {
    let result = async {
        let body: LoginRequest = parse_json_body(req).await?;
        attempt(&state, body.password.as_deref().unwrap_or(""))
    }
    .await;

    login_result(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::config::Args;

    fn state_with_password(password: Option<&str>) -> AppState {
        let mut args = Args::parse_from(["vitrine", "--dev-mode"]);
        // Override env-backed fields so ambient variables cannot leak in
        args.admin_password = password.map(String::from);
        args.jwt_secret = None;
        AppState::new(args, None, None)
    }

    #[test]
    fn correct_password_yields_token() {
        let state = state_with_password(Some("abc123"));
        let token = attempt(&state, "abc123").unwrap();
        assert!(token.starts_with("temp_token_"));
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let state = state_with_password(Some("abc123"));
        let err = attempt(&state, "wrongpass").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[test]
    fn unconfigured_secret_reports_config_error() {
        let state = state_with_password(None);
        let err = attempt(&state, "anything").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert_eq!(err.to_string(), "Server configuration error");
    }
}
