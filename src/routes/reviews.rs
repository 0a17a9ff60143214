//! Review submission and listing routes

use bson::doc;
use hyper::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::schemas::{ReviewDoc, REVIEW_COLLECTION};
use crate::db::MongoCollection;
use crate::error::ApiError;
use crate::routes::{error_response, json_response, parse_json_body, BoxBody};
use crate::server::AppState;

/// Review submission payload. All fields are validated separately so a
/// missing field reports "All fields are required" rather than a JSON
/// deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Review as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    /// Store-assigned identifier (hex)
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub rating: i32,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<ReviewDoc> for ReviewResponse {
    fn from(doc: ReviewDoc) -> Self {
        Self {
            id: doc._id.map(|id| id.to_hex()).unwrap_or_default(),
            project_id: doc.project_id,
            name: doc.name,
            rating: doc.rating,
            comment: doc.comment,
            created_at: doc.metadata.created_at.map(|t| t.to_chrono().to_rfc3339()),
            updated_at: doc.metadata.updated_at.map(|t| t.to_chrono().to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    message: String,
    review: ReviewResponse,
}

/// Validate a review submission, returning the owned field values.
///
/// Falsy fields (absent, empty string, rating 0) report the required-fields
/// message; an out-of-range rating reports the range message.
pub fn validate_review(input: ReviewInput) -> Result<(String, String, i32, String), ApiError> {
    let project_id = input.project_id.unwrap_or_default();
    let name = input.name.unwrap_or_default();
    let comment = input.comment.unwrap_or_default();
    let rating = input.rating.unwrap_or(0);

    if project_id.is_empty() || name.is_empty() || comment.is_empty() || rating == 0 {
        return Err(ApiError::Validation("All fields are required".into()));
    }

    if !(1..=5).contains(&rating) {
        return Err(ApiError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }

    Ok((project_id, name, rating, comment))
}

async fn reviews_collection(state: &AppState) -> Result<MongoCollection<ReviewDoc>, ApiError> {
    state
        .mongo
        .as_ref()
        .ok_or_else(|| ApiError::Database("MongoDB is not connected".into()))?
        .collection(REVIEW_COLLECTION)
        .await
}

/// POST /api/review - validate and persist a new review
pub async fn handle_submit_review(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> hyper::Response<BoxBody> {
    let result = async {
        let input: ReviewInput = parse_json_body(req).await?;
        let (project_id, name, rating, comment) = validate_review(input)?;

        let mut review = ReviewDoc::new(project_id, name, rating, comment);
        let collection = reviews_collection(&state).await?;
        let id = collection.insert_one(&mut review).await?;
        review._id = Some(id);

        info!(
            project_id = %review.project_id,
            rating = review.rating,
            "Review saved"
        );
        Ok::<ReviewDoc, ApiError>(review)
    }
    .await;

    match result {
        Ok(review) => json_response(
            StatusCode::CREATED,
            &SubmitResponse {
                message: "Review added successfully".to_string(),
                review: review.into(),
            },
        ),
        Err(err) => error_response(err, "Error adding review"),
    }
}

/// GET /api/reviews/:projectId - reviews for one project, newest first.
///
/// No existence check on the referenced project; an unknown projectId
/// yields an empty array.
pub async fn handle_list_reviews(
    state: Arc<AppState>,
    project_id: &str,
) -> hyper::Response<BoxBody> {
    let result = async {
        let collection = reviews_collection(&state).await?;
        collection
            .find_sorted(
                doc! { "projectId": project_id },
                doc! { "metadata.created_at": -1 },
            )
            .await
    }
    .await;

    match result {
        Ok(docs) => {
            let reviews: Vec<ReviewResponse> = docs.into_iter().map(Into::into).collect();
            json_response(StatusCode::OK, &reviews)
        }
        Err(err) => error_response(err, "Error fetching reviews"),
    }
}
