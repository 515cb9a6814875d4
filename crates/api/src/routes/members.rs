//! Member submission route handlers: the form's CRUD surface.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    validate_request, CreateSubmissionRequest, ListFilter, ReviewUpdate, Submission,
    SubmissionQuery, SubmissionStatus, UpdateSubmissionRequest,
};
use persistence::repositories::{DuplicateField, SubmissionRepository};
use shared::pagination::{offset, Pagination, DEFAULT_PAGE};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_submission_created;

/// Default page size for the public list endpoint.
const DEFAULT_LIST_LIMIT: u32 = 50;

/// Response for a created submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub data: Submission,
    pub message: String,
}

/// Response for a page of submissions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsResponse {
    pub success: bool,
    pub data: Vec<Submission>,
    pub pagination: Pagination,
}

/// Response for a deleted submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubmissionResponse {
    pub success: bool,
    pub message: String,
    pub data: DeletedId,
}

#[derive(Debug, Serialize)]
pub struct DeletedId {
    pub id: Uuid,
}

/// POST /api/members
///
/// Validates the payload, pre-checks the unique fields for a friendlier
/// conflict message, and inserts. A concurrent duplicate that slips past
/// the pre-check still surfaces as a conflict via the unique index.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_submission_body(&body)?.normalized();

    let errors = validate_request(&request);
    if !errors.is_empty() {
        return Err(ApiError::Validation(
            errors
                .into_iter()
                .map(|(field, message)| (field.to_string(), message))
                .collect(),
        ));
    }

    let repo = SubmissionRepository::new(state.pool.clone());

    let duplicate = repo
        .find_duplicate(
            &request.personal_info.reg_number,
            &request.personal_info.vit_email,
            &request.personal_info.personal_email,
        )
        .await?;
    if let Some(field) = duplicate {
        return Err(duplicate_conflict(field));
    }

    let entity = repo.create(&request).await?;
    record_submission_created();

    tracing::info!(
        reg_number = %request.personal_info.reg_number,
        domain = %request.domain_info.domain,
        "Submission stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            success: true,
            data: entity.into(),
            message: "Form submitted successfully!".to_string(),
        }),
    ))
}

/// GET /api/members?status=&domain=&limit=&page=
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<SubmissionQuery>,
) -> Result<Json<ListSubmissionsResponse>, ApiError> {
    let response = list_page(&state, &query, DEFAULT_LIST_LIMIT).await?;
    Ok(Json(response))
}

/// PUT /api/members
pub async fn update_submission(
    State(state): State<AppState>,
    Json(body): Json<UpdateSubmissionRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    body.validate()?;
    let (id, update) = review_update_from(&body, Utc::now())?;

    let repo = SubmissionRepository::new(state.pool.clone());
    let entity = repo
        .update_review(id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    Ok(Json(SubmissionResponse {
        success: true,
        data: entity.into(),
        message: "Submission updated successfully".to_string(),
    }))
}

/// Query parameters for DELETE /api/members.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<Uuid>,
}

/// DELETE /api/members?id=
pub async fn delete_submission(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteSubmissionResponse>, ApiError> {
    let id = params
        .id
        .ok_or_else(|| ApiError::BadRequest("Submission ID is required".to_string()))?;

    let repo = SubmissionRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Submission not found".to_string()));
    }

    Ok(Json(DeleteSubmissionResponse {
        success: true,
        message: "Submission deleted successfully".to_string(),
        data: DeletedId { id },
    }))
}

/// Shared list logic for the public endpoint and the admin dashboard,
/// which differ only in their default page size.
pub(crate) async fn list_page(
    state: &AppState,
    query: &SubmissionQuery,
    default_limit: u32,
) -> Result<ListSubmissionsResponse, ApiError> {
    query.validate()?;
    let filter = build_filter(query)?;
    let limit = query.limit.unwrap_or(default_limit);
    let page = query.page.unwrap_or(DEFAULT_PAGE);

    let repo = SubmissionRepository::new(state.pool.clone());
    let entities = repo.list(&filter, limit, offset(page, limit)).await?;
    let total_count = repo.count(&filter).await?;

    Ok(ListSubmissionsResponse {
        success: true,
        data: entities.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(page, limit, total_count),
    })
}

/// Decodes the submission body, answering 400 (not a body-rejection error)
/// both when a required top-level section is missing and when a section
/// fails to decode.
fn parse_submission_body(body: &serde_json::Value) -> Result<CreateSubmissionRequest, ApiError> {
    let missing_section = ["personalInfo", "domainInfo", "commitment"]
        .iter()
        .any(|section| body.get(section).is_none());
    if missing_section {
        return Err(ApiError::BadRequest(
            "Missing required form sections (personalInfo, domainInfo, commitment)".to_string(),
        ));
    }

    serde_json::from_value(body.clone())
        .map_err(|err| ApiError::BadRequest(format!("Malformed submission payload: {err}")))
}

fn build_filter(query: &SubmissionQuery) -> Result<ListFilter, ApiError> {
    let status = match query.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<SubmissionStatus>()
                .map_err(|err| ApiError::BadRequest(err.to_string()))?,
        ),
        _ => None,
    };
    let domain = query
        .domain
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    Ok(ListFilter { status, domain })
}

fn duplicate_conflict(field: DuplicateField) -> ApiError {
    let message = match field {
        DuplicateField::RegNumber => "This registration number has already been submitted",
        DuplicateField::VitEmail => "This VIT email has already been submitted",
        DuplicateField::PersonalEmail => "This personal email has already been submitted",
    };
    ApiError::Conflict(message.to_string())
}

fn review_update_from(
    req: &UpdateSubmissionRequest,
    now: DateTime<Utc>,
) -> Result<(Uuid, ReviewUpdate), ApiError> {
    let id = req
        .id
        .ok_or_else(|| ApiError::BadRequest("Submission ID is required".to_string()))?;

    let status = match req.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<SubmissionStatus>()
                .map_err(|err| ApiError::BadRequest(err.to_string()))?,
        ),
        None => None,
    };

    // The review timestamp is stamped when the update moves the record out
    // of its initial status.
    let reviewed_at = status.filter(|s| !s.is_initial()).map(|_| now);

    Ok((
        id,
        ReviewUpdate {
            status,
            reviewed_by: req.reviewed_by.clone(),
            notes: req.notes.clone(),
            reviewed_at,
        },
    ))
}
