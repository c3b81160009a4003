use crate::auth;
use crate::cli::globals::GlobalArgs;
use axum::{
    extract::Extension,
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// Best-effort teardown followed by an unconditional redirect. A user must
/// never be left on an authenticated-looking page after asking to sign out,
/// so remote failures change nothing about the response.
#[utoipa::path(
    post,
    path = "/v1/auth/sign-out",
    responses (
        (status = 303, description = "Session torn down, redirected to sign-in"),
    ),
    tag = "auth"
)]
#[instrument(skip(headers, globals))]
pub async fn sign_out(headers: HeaderMap, globals: Extension<Arc<GlobalArgs>>) -> impl IntoResponse {
    let token = super::extract_session_token(&headers);

    auth::sign_out(&globals, token.as_deref()).await;

    // Always clear the cookie, even if the remote session was missing.
    let mut response_headers = HeaderMap::new();
    response_headers.insert(LOCATION, HeaderValue::from_static("/sign-in"));
    response_headers.insert(SET_COOKIE, super::clear_session_cookie());

    (StatusCode::SEE_OTHER, response_headers)
}
