use crate::auth;
use crate::cli::globals::GlobalArgs;
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Resolve the current user from the session cookie. Absence is the
/// expected unauthenticated outcome, not an error.
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses (
        (status = 200, description = "Current user", body = crate::auth::models::UserIdentity, content_type = "application/json"),
        (status = 204, description = "Not authenticated"),
    ),
    tag = "auth"
)]
#[instrument(skip(headers, globals))]
pub async fn me(headers: HeaderMap, globals: Extension<Arc<GlobalArgs>>) -> impl IntoResponse {
    let token = super::extract_session_token(&headers);

    match auth::current_user(&globals, token.as_deref()).await {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
