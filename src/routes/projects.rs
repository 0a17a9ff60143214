//! Project query routes
//!
//! Read-only accessors over the `projects` collection. Projects are seeded
//! out-of-band; no write route exists here.

use bson::{doc, oid::ObjectId};
use hyper::StatusCode;
use serde::Serialize;
use std::sync::Arc;

use crate::db::schemas::{ProjectCategory, ProjectDoc, PROJECT_COLLECTION};
use crate::db::MongoCollection;
use crate::error::ApiError;
use crate::routes::{error_response, json_response, BoxBody};
use crate::server::AppState;

/// Project as returned by the API
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Store-assigned identifier (hex)
    pub id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub title: String,
    pub category: ProjectCategory,
    pub description_en: String,
    pub description_fr: String,
    pub tech: Vec<String>,
    #[serde(rename = "githubLink")]
    pub github_link: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<ProjectDoc> for ProjectResponse {
    fn from(doc: ProjectDoc) -> Self {
        Self {
            id: doc._id.map(|id| id.to_hex()).unwrap_or_default(),
            project_id: doc.project_id,
            title: doc.title,
            category: doc.category,
            description_en: doc.description_en,
            description_fr: doc.description_fr,
            tech: doc.tech,
            github_link: doc.github_link,
            created_at: doc.metadata.created_at.map(|t| t.to_chrono().to_rfc3339()),
            updated_at: doc.metadata.updated_at.map(|t| t.to_chrono().to_rfc3339()),
        }
    }
}

async fn projects_collection(
    state: &AppState,
) -> Result<MongoCollection<ProjectDoc>, ApiError> {
    state
        .mongo
        .as_ref()
        .ok_or_else(|| ApiError::Database("MongoDB is not connected".into()))?
        .collection(PROJECT_COLLECTION)
        .await
}

/// GET /api/projects - all projects, newest first
pub async fn handle_list_projects(state: Arc<AppState>) -> hyper::Response<BoxBody> {
    let result = async {
        let collection = projects_collection(&state).await?;
        collection
            .find_sorted(doc! {}, doc! { "metadata.created_at": -1 })
            .await
    }
    .await;

    match result {
        Ok(docs) => {
            let projects: Vec<ProjectResponse> = docs.into_iter().map(Into::into).collect();
            json_response(StatusCode::OK, &projects)
        }
        Err(err) => error_response(err, "Error fetching projects"),
    }
}

/// GET /api/projects/:id - project by store-assigned identifier
pub async fn handle_get_project(state: Arc<AppState>, id: &str) -> hyper::Response<BoxBody> {
    let result = async {
        let oid = ObjectId::parse_str(id)
            .map_err(|e| ApiError::Internal(format!("Invalid object id '{}': {}", id, e)))?;
        let collection = projects_collection(&state).await?;
        collection
            .find_by_id(oid)
            .await?
            .ok_or_else(|| ApiError::NotFound("Project not found".into()))
    }
    .await;

    match result {
        Ok(doc) => json_response(StatusCode::OK, &ProjectResponse::from(doc)),
        Err(err) => error_response(err, "Error fetching project"),
    }
}

/// GET /api/projects/projectid/:projectId - project by external identifier
pub async fn handle_get_project_by_external_id(
    state: Arc<AppState>,
    project_id: &str,
) -> hyper::Response<BoxBody> {
    let result = async {
        let collection = projects_collection(&state).await?;
        collection
            .find_one(doc! { "projectId": project_id })
            .await?
            .ok_or_else(|| ApiError::NotFound("Project not found".into()))
    }
    .await;

    match result {
        Ok(doc) => json_response(StatusCode::OK, &ProjectResponse::from(doc)),
        Err(err) => error_response(err, "Error fetching project"),
    }
}

/// GET /api/projects/category/:category - projects matching a category.
///
/// The category string is not validated; an unrecognized value simply
/// matches nothing and yields an empty array.
pub async fn handle_list_projects_by_category(
    state: Arc<AppState>,
    category: &str,
) -> hyper::Response<BoxBody> {
    let result = async {
        let collection = projects_collection(&state).await?;
        collection.find_many(doc! { "category": category }).await
    }
    .await;

    match result {
        Ok(docs) => {
            let projects: Vec<ProjectResponse> = docs.into_iter().map(Into::into).collect();
            json_response(StatusCode::OK, &projects)
        }
        Err(err) => error_response(err, "Error fetching projects"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::Metadata;

    #[test]
    fn response_flattens_metadata_timestamps() {
        let mut doc = ProjectDoc {
            _id: Some(ObjectId::new()),
            metadata: Metadata::new(),
            project_id: "p_1".into(),
            title: "Demo".into(),
            category: ProjectCategory::Desktop,
            description_en: "en".into(),
            description_fr: "fr".into(),
            tech: vec!["rust".into()],
            github_link: "https://github.com/example/demo".into(),
        };
        doc.metadata.updated_at = doc.metadata.created_at;

        let response = ProjectResponse::from(doc);
        assert_eq!(response.project_id, "p_1");
        assert!(response.created_at.is_some());
        assert_eq!(response.created_at, response.updated_at);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["projectId"], "p_1");
        assert_eq!(json["category"], "desktop");
        assert_eq!(json["githubLink"], "https://github.com/example/demo");
    }

    #[test]
    fn missing_id_serializes_empty() {
        let response = ProjectResponse::from(ProjectDoc::default());
        assert!(response.id.is_empty());
    }
}
