//! Review document schema
//!
//! Reviews reference a project's external identifier. The reference is not
//! enforced as a foreign key: a review may point at a nonexistent project.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for reviews
pub const REVIEW_COLLECTION: &str = "project_reviews";

/// Review document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ReviewDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// External project identifier this review belongs to
    #[serde(rename = "projectId")]
    pub project_id: String,

    /// Reviewer display name
    pub name: String,

    /// Rating in [1, 5]
    pub rating: i32,

    /// Review text
    pub comment: String,
}

impl ReviewDoc {
    /// Create a new review document with fresh metadata
    pub fn new(project_id: String, name: String, rating: i32, comment: String) -> Self {
        Self {
            _id: None,
            metadata: Metadata::new(),
            project_id,
            name,
            rating,
            comment,
        }
    }
}

impl IntoIndexes for ReviewDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Per-project listing queries
            (
                doc! { "projectId": 1 },
                Some(
                    IndexOptions::builder()
                        .name("project_id_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

impl MutMetadata for ReviewDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_review_has_timestamps() {
        let review = ReviewDoc::new("p_1".into(), "Jane".into(), 5, "Great".into());
        assert!(review.metadata.created_at.is_some());
        assert!(review.metadata.updated_at.is_some());
        assert!(review._id.is_none());
    }

    #[test]
    fn project_id_is_indexed() {
        let indices = ReviewDoc::into_indices();
        assert_eq!(indices.len(), 1);
        assert_eq!(indices[0].0, doc! { "projectId": 1 });
    }
}
