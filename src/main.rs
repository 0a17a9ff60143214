//! Vitrine - portfolio backend API

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::{
    config::Args,
    db::MongoClient,
    mail::{ContactTransport, Mailer},
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vitrine={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  Vitrine - Portfolio Backend API");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!(
        "Mode: {}",
        if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" }
    );
    info!("MongoDB: {} (db: {})", args.mongodb_uri, args.mongodb_db);
    info!("SMTP host: {}", args.smtp_host);
    info!("CV path: {}", args.cv_path);
    info!("======================================");

    // Connect to MongoDB (optional in dev mode)
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => {
            info!("MongoDB connected successfully");
            Some(client)
        }
        Err(e) => {
            if args.dev_mode {
                warn!("MongoDB connection failed (dev mode, continuing without): {}", e);
                None
            } else {
                error!("MongoDB connection failed: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Build the SMTP transport (optional in dev mode)
    let mailer: Option<Arc<dyn ContactTransport>> = match Mailer::new(&args) {
        Ok(m) => {
            info!("SMTP transport configured");
            Some(Arc::new(m))
        }
        Err(e) => {
            if args.dev_mode {
                warn!("SMTP transport not configured (dev mode, continuing without): {}", e);
                None
            } else {
                error!("SMTP transport setup failed: {}", e);
                std::process::exit(1);
            }
        }
    };

    let state = Arc::new(server::AppState::new(args, mongo, mailer));

    server::run(state).await?;

    Ok(())
}
