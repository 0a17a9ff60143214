//! Health and version endpoints
//!
//! - /health, /healthz - liveness probe, always 200 while the service runs
//! - /version - build information for deployment verification

use hyper::StatusCode;
use serde::Serialize;
use std::sync::Arc;

use crate::routes::{json_response, BoxBody};
use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall health status (true if service is running)
    pub healthy: bool,
    /// Service version
    pub version: &'static str,
    /// Whether MongoDB is connected
    pub database: bool,
    /// Whether the SMTP transport is configured
    pub mail: bool,
    /// Operating mode
    pub mode: String,
    /// Current timestamp
    pub timestamp: String,
}

/// Handle liveness probe (/health, /healthz)
pub fn health_check(state: Arc<AppState>) -> hyper::Response<BoxBody> {
    let response = HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        database: state.mongo.is_some(),
        mail: state.mailer.is_some(),
        mode: if state.args.dev_mode {
            "development".to_string()
        } else {
            "production".to_string()
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    json_response(StatusCode::OK, &response)
}

#[derive(Serialize)]
pub struct VersionResponse {
    /// Cargo package version
    pub version: &'static str,
    /// Git commit hash (short)
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Service name
    pub service: &'static str,
}

/// Handle version endpoint (/version)
pub fn version_info() -> hyper::Response<BoxBody> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: "vitrine",
    };

    json_response(StatusCode::OK, &response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use clap::Parser;

    #[test]
    fn liveness_always_ok() {
        let state = Arc::new(AppState::new(
            Args::parse_from(["vitrine", "--dev-mode"]),
            None,
            None,
        ));
        let response = health_check(state);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn version_always_ok() {
        assert_eq!(version_info().status(), StatusCode::OK);
    }
}
