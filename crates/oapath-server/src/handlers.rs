//! Request handlers
//!
//! The core pipeline is synchronous, so each handler hops onto the
//! blocking pool. Lookup misses stay 200s with `not_found` classifications
//! in the body; only an unknown author profile is a 404 and only
//! configuration defects surface as 500s.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use oapath_core::retain_no_cost_permitted_oa;
use oapath_core::schema::{Author, Paper};

use crate::state::SharedState;

/// Error envelope for the JSON API.
pub enum ApiError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            Self::Internal(e) => {
                log::error!("internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

#[derive(Debug, Deserialize)]
pub struct PaperQuery {
    pub doi: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    /// ORCID iD, Semantic Scholar profile id/URL, or author name.
    pub profile: String,
}

/// GET /api/papers — classified paper for a DOI.
pub async fn get_paper(
    State(state): State<SharedState>,
    Query(query): Query<PaperQuery>,
) -> Result<Json<Paper>, ApiError> {
    let doi = query.doi.clone();
    let mut paper = run_blocking(move || state.enrich_paper(&doi))
        .await?
        .map_err(|e| ApiError::Internal(e.into()))?;

    // Show only the clauses substantiating a no-cost classification
    if let Some(details) = paper.oa_pathway_details.take() {
        paper.oa_pathway_details =
            Some(details.iter().map(retain_no_cost_permitted_oa).collect());
    }
    Ok(Json(paper))
}

/// GET /api/authors — author with the papers a profile search returned.
///
/// Papers are not individually classified here; clients follow up with
/// `GET /api/papers?doi=` per paper.
pub async fn get_author(
    State(state): State<SharedState>,
    Query(query): Query<AuthorQuery>,
) -> Result<Json<Author>, ApiError> {
    let profile = query.profile.clone();
    let author = run_blocking(move || state.find_author(&profile)).await?;
    match author {
        Some(author) => Ok(Json(author)),
        None => Err(ApiError::NotFound(format!(
            "No author found for {}",
            query.profile
        ))),
    }
}

/// GET /api/oab/find — Open Access Button metadata passthrough.
pub async fn oab_find(
    State(state): State<SharedState>,
    Query(query): Query<PaperQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let doi = query.doi.clone();
    let found = run_blocking(move || state.oabutton.find(&doi)).await?;
    found.map(Json).ok_or_else(|| {
        ApiError::NotFound(format!("Open Access Button has no record for {}", query.doi))
    })
}

/// GET /api/oab/permissions — Open Access Button permissions passthrough.
pub async fn oab_permissions(
    State(state): State<SharedState>,
    Query(query): Query<PaperQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let doi = query.doi.clone();
    let permissions = run_blocking(move || state.oabutton.permissions(&doi)).await?;
    permissions.map(Json).ok_or_else(|| {
        ApiError::NotFound(format!("No re-publication permissions found for {}", query.doi))
    })
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn run_blocking<T: Send + 'static>(
    f: impl FnOnce() -> T + Send + 'static,
) -> Result<T, ApiError> {
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.into()))
}
