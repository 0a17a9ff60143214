//! Database schemas for Vitrine
//!
//! Plain document records for MongoDB storage. Input validation lives with
//! the route handlers, not in the schema types.

mod metadata;
mod project;
mod review;

pub use metadata::Metadata;
pub use project::{ProjectCategory, ProjectDoc, PROJECT_COLLECTION};
pub use review::{ReviewDoc, REVIEW_COLLECTION};
