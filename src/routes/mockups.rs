//! Catalog routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::services::catalog::{MockupRecord, MockupStatus, NewMockup, StatusCounts, today};
use crate::services::filter::{self, StatusFilter};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub search: String,
    pub status: StatusFilter,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusBody {
    pub status: MockupStatus,
}

/// `GET /api/mockups?search=&status=` — visible records, newest first.
pub async fn list_mockups(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Vec<MockupRecord>> {
    let catalog = state.catalog.read().await;
    Json(filter::visible(catalog.records(), &query.search, query.status))
}

/// `POST /api/mockups` — register a mockup. 422 when title or url is missing.
pub async fn create_mockup(
    State(state): State<AppState>,
    Json(body): Json<NewMockup>,
) -> Result<(StatusCode, Json<MockupRecord>), StatusCode> {
    let mut catalog = state.catalog.write().await;
    let record = catalog
        .create(body, today())
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/mockups/:id`
pub async fn get_mockup(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<MockupRecord>, StatusCode> {
    let catalog = state.catalog.read().await;
    catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `PATCH /api/mockups/:id/status` — move a record to a new status.
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ChangeStatusBody>,
) -> Result<Json<MockupRecord>, StatusCode> {
    let mut catalog = state.catalog.write().await;
    catalog
        .change_status(&id, body.status, today())
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/mockups/stats` — record counts per status.
pub async fn status_stats(State(state): State<AppState>) -> Json<StatusCounts> {
    Json(state.catalog.read().await.status_counts())
}
