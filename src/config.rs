//! Configuration for Vitrine
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Vitrine - portfolio backend API
#[derive(Parser, Debug, Clone)]
#[command(name = "vitrine")]
#[command(about = "REST API backend for a developer portfolio")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "portfolio")]
    pub mongodb_db: String,

    /// Admin password compared against login attempts (required in production)
    #[arg(long, env = "DEFAULT_PASSWORD")]
    pub admin_password: Option<String>,

    /// JWT secret for token signing (optional; opaque tokens are issued without it)
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// JWT token expiry in seconds
    #[arg(long, env = "JWT_EXPIRY_SECONDS", default_value = "3600")]
    pub jwt_expiry_seconds: u64,

    /// SMTP relay host for contact mail
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP account username, also the default sender and recipient
    #[arg(long, env = "EMAIL_USER")]
    pub email_user: Option<String>,

    /// SMTP account password
    #[arg(long, env = "EMAIL_PASS")]
    pub email_pass: Option<String>,

    /// Recipient of contact mail (defaults to EMAIL_USER)
    #[arg(long, env = "CONTACT_RECIPIENT")]
    pub contact_recipient: Option<String>,

    /// Path to the CV document served at /api/cv
    #[arg(long, env = "CV_PATH", default_value = "assets/cv.pdf")]
    pub cv_path: String,

    /// Suggested filename for the CV download
    #[arg(long, env = "CV_FILENAME", default_value = "cv.pdf")]
    pub cv_filename: String,

    /// Path to the static projects listing page
    #[arg(long, env = "PROJECTS_PAGE", default_value = "assets/projects.html")]
    pub projects_page: String,

    /// Directory of files served at /api/assets
    #[arg(long, env = "ASSETS_DIR", default_value = "assets")]
    pub assets_dir: String,

    /// Enable development mode (MongoDB and SMTP become optional)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Get effective contact recipient (falls back to the SMTP username)
    pub fn contact_recipient(&self) -> Option<&str> {
        self.contact_recipient
            .as_deref()
            .or(self.email_user.as_deref())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode {
            if self.admin_password.as_deref().unwrap_or("").is_empty() {
                return Err("DEFAULT_PASSWORD is required in production mode".to_string());
            }
            if self.email_user.is_none() || self.email_pass.is_none() {
                return Err("EMAIL_USER and EMAIL_PASS are required in production mode".to_string());
            }
        }

        Ok(())
    }
}
