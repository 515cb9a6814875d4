//! Admin authentication middleware.
//!
//! The dashboard endpoint is gated by a single shared secret presented as a
//! bearer token and compared against the configured admin secret.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::AppState;
use shared::crypto::secrets_match;

/// Middleware that requires the admin bearer token.
///
/// Rejects requests whose `Authorization: Bearer <token>` header does not
/// match the configured admin secret. An empty configured secret rejects
/// everything.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    match token {
        Some(token) if secrets_match(token, &state.config.security.admin_secret) => {
            next.run(req).await
        }
        _ => unauthorized_response("Unauthorized access"),
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": message,
        })),
    )
        .into_response()
}
