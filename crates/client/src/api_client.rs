//! HTTP clients for the submission endpoint and the admin dashboard.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use domain::models::{CreateSubmissionRequest, Submission};
use shared::pagination::Pagination;

/// The server's response envelope, loosely typed so every outcome parses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    validation_errors: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

/// What a submission attempt came back as, mapped for the UI.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 201: the stored record, plus the server's success message.
    Created {
        submission: Box<Submission>,
        message: String,
    },
    /// 409: duplicate registration number or email; resubmission is blocked.
    Conflict(String),
    /// 400: schema constraints failed; per-field map when the server sent one.
    Invalid {
        error: String,
        field_errors: BTreeMap<String, String>,
    },
    /// Transport or server failure; retryable by submitting again.
    Failed(String),
}

/// Client for `POST /api/members`.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Submit a validated form payload and interpret the response.
    ///
    /// Never fails: transport errors become `SubmitOutcome::Failed` so the
    /// UI can offer a retry.
    pub async fn submit(&self, request: &CreateSubmissionRequest) -> SubmitOutcome {
        let url = format!("{}/api/members", self.base_url);
        let response = match self.http.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "Submission request failed");
                return SubmitOutcome::Failed("Network error".to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => interpret_submit_response(status, &body),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read submission response");
                SubmitOutcome::Failed("Network error".to_string())
            }
        }
    }
}

/// Maps a raw submission response into a UI outcome.
fn interpret_submit_response(status: u16, body: &str) -> SubmitOutcome {
    let envelope: ApiEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) => return SubmitOutcome::Failed("Unexpected response from server".to_string()),
    };

    match status {
        201 if envelope.success => {
            let submission = envelope
                .data
                .and_then(|data| serde_json::from_value::<Submission>(data).ok());
            match submission {
                Some(submission) => SubmitOutcome::Created {
                    submission: Box::new(submission),
                    message: envelope
                        .message
                        .unwrap_or_else(|| "Form submitted successfully!".to_string()),
                },
                None => SubmitOutcome::Failed("Unexpected response from server".to_string()),
            }
        }
        409 => SubmitOutcome::Conflict(
            envelope
                .error
                .unwrap_or_else(|| "This registration number has already been submitted".to_string()),
        ),
        400 => SubmitOutcome::Invalid {
            error: envelope.error.unwrap_or_else(|| "Validation failed".to_string()),
            field_errors: envelope.validation_errors.unwrap_or_default(),
        },
        _ => SubmitOutcome::Failed(
            envelope.error.unwrap_or_else(|| "Submission failed".to_string()),
        ),
    }
}

/// One fetched dashboard page.
#[derive(Debug)]
pub struct DashboardPage {
    pub data: Vec<Submission>,
    pub pagination: Pagination,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),
}

/// Bearer-authenticated client for `GET /api/dashboard`.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    admin_secret: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>, admin_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            admin_secret: admin_secret.into(),
        }
    }

    /// Fetch one page of submissions, optionally filtered by domain/status.
    pub async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        domain: Option<&str>,
        status: Option<&str>,
    ) -> Result<DashboardPage, DashboardError> {
        let url = format!("{}/api/dashboard", self.base_url);
        let mut query: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(domain) = domain {
            query.push(("domain", domain.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.admin_secret)
            .query(&query)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let body = response.text().await?;
        parse_dashboard_response(status_code, &body)
    }
}

/// Maps a raw dashboard response into a page or an error.
fn parse_dashboard_response(status: u16, body: &str) -> Result<DashboardPage, DashboardError> {
    if status == 401 {
        return Err(DashboardError::Unauthorized);
    }

    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|_| DashboardError::Api("Unexpected response from server".to_string()))?;

    if !envelope.success {
        return Err(DashboardError::Api(
            envelope.error.unwrap_or_else(|| "Request failed".to_string()),
        ));
    }

    let data = envelope
        .data
        .and_then(|data| serde_json::from_value::<Vec<Submission>>(data).ok())
        .ok_or_else(|| DashboardError::Api("Malformed response data".to_string()))?;
    let pagination = envelope
        .pagination
        .ok_or_else(|| DashboardError::Api("Missing pagination".to_string()))?;

    Ok(DashboardPage { data, pagination })
}
