//! Vitrine - portfolio backend API
//!
//! A thin REST layer over a MongoDB document store plus an SMTP mail
//! transport. Every route is a direct pass-through: project reads, review
//! submission, a contact-form mailer, a password-comparison login, and a
//! static CV download.
//!
//! ## Services
//!
//! - **Projects**: read-only queries over the `projects` collection
//! - **Reviews**: validated submission and per-project listing
//! - **Contact**: validated contact form forwarded via SMTP
//! - **Login**: secret comparison issuing a session token
//! - **Assets**: CV download, projects page, visit tracking

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod mail;
pub mod routes;
pub mod server;

pub use config::Args;
pub use error::ApiError;
pub use server::{run, AppState};
