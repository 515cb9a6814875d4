//! Header-secret-gated batch endpoints for external schedulers.

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;

use persistence::repositories::SubmissionRepository;
use shared::crypto::secrets_match;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::{run_birthday_check, BirthdayEmailResult};

/// Header carrying the shared cron secret.
pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Response for the birthday check endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayCheckResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<BirthdayEmailResult>,
}

/// POST /api/cron/check-birthday
///
/// Compares stored birthdates against today's date in IST and dispatches a
/// birthday email to each matching member plus a notification to the board.
pub async fn check_birthday(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BirthdayCheckResponse>, ApiError> {
    let presented = headers
        .get(CRON_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !secrets_match(presented, &state.config.cron.secret) {
        return Err(ApiError::Unauthorized("Not authorized".to_string()));
    }

    let repo = SubmissionRepository::new(state.pool.clone());
    let results = run_birthday_check(&repo, &state.email).await?;

    Ok(Json(BirthdayCheckResponse {
        success: true,
        message: "Birthday check completed".to_string(),
        results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_envelope_shape() {
        let response = BirthdayCheckResponse {
            success: true,
            message: "Birthday check completed".to_string(),
            results: vec![BirthdayEmailResult {
                name: "Rahul Kumar".to_string(),
                member_email_sent: true,
                board_email_sent: false,
            }],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["results"][0]["memberEmailSent"], true);
        assert_eq!(json["results"][0]["boardEmailSent"], false);
    }
}
