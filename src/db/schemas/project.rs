//! Project document schema
//!
//! Projects are created out-of-band (seeded directly into MongoDB); this API
//! only ever reads them.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for projects
pub const PROJECT_COLLECTION: &str = "projects";

/// Project category
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Desktop,
    #[default]
    Web,
    Mobile,
}

/// Project document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProjectDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Human-assigned external identifier used in public URLs (e.g. "p_1")
    #[serde(rename = "projectId")]
    pub project_id: String,

    /// Project title
    pub title: String,

    /// Project category (desktop, web, mobile)
    pub category: ProjectCategory,

    /// English description
    pub description_en: String,

    /// French description
    pub description_fr: String,

    /// Ordered technology tags
    pub tech: Vec<String>,

    /// Source repository link
    #[serde(rename = "githubLink")]
    pub github_link: String,
}

impl IntoIndexes for ProjectDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // External identifier is unique across all projects
            (
                doc! { "projectId": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("project_id_unique".to_string())
                        .build(),
                ),
            ),
            // Category filter queries
            (
                doc! { "category": 1 },
                Some(
                    IndexOptions::builder()
                        .name("category_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

impl MutMetadata for ProjectDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProjectCategory::Desktop).unwrap(),
            "\"desktop\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectCategory::Web).unwrap(),
            "\"web\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectCategory::Mobile).unwrap(),
            "\"mobile\""
        );
    }

    #[test]
    fn project_id_index_is_unique() {
        let indices = ProjectDoc::into_indices();
        let (keys, opts) = &indices[0];
        assert_eq!(keys, &doc! { "projectId": 1 });
        assert_eq!(opts.as_ref().unwrap().unique, Some(true));
    }

    #[test]
    fn doc_round_trips_through_bson() {
        let project = ProjectDoc {
            _id: None,
            metadata: Metadata::new(),
            project_id: "p_1".into(),
            title: "Portfolio".into(),
            category: ProjectCategory::Web,
            description_en: "A portfolio site".into(),
            description_fr: "Un site portfolio".into(),
            tech: vec!["rust".into(), "mongodb".into()],
            github_link: "https://github.com/example/portfolio".into(),
        };

        let bytes = bson::to_vec(&project).unwrap();
        let back: ProjectDoc = bson::from_slice(&bytes).unwrap();
        assert_eq!(back.project_id, "p_1");
        assert_eq!(back.category, ProjectCategory::Web);
        assert_eq!(back.tech, vec!["rust".to_string(), "mongodb".to_string()]);
    }
}
