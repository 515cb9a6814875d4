//! Admin dashboard route handler.
//!
//! Same page shape as the public list endpoint, but gated by the admin
//! bearer token and paged 20 at a time by default.

use axum::{
    extract::{Query, State},
    Json,
};

use domain::models::SubmissionQuery;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::members::{list_page, ListSubmissionsResponse};

/// Default page size for the admin dashboard.
const DEFAULT_DASHBOARD_LIMIT: u32 = 20;

/// GET /api/dashboard?page=&limit=&domain=&status=
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<SubmissionQuery>,
) -> Result<Json<ListSubmissionsResponse>, ApiError> {
    let response = list_page(&state, &query, DEFAULT_DASHBOARD_LIMIT).await?;
    Ok(Json(response))
}
