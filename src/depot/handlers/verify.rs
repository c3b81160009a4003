use crate::appwrite::AdminClient;
use crate::auth;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub password: String,
}

/// Exchange the pending account id plus passcode for a session. The cookie
/// is only ever set on success; a rejected code leaves no session state.
#[utoipa::path(
    post,
    path = "/v1/auth/verify",
    request_body = VerifyRequest,
    responses (
        (status = 200, description = "Session established, cookie set", body = String, content_type = "application/json"),
        (status = 400, description = "Missing payload", body = String),
        (status = 401, description = "Wrong or expired passcode", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip(admin, payload))]
pub async fn verify(
    admin: Extension<AdminClient>,
    payload: Option<Json<VerifyRequest>>,
) -> impl IntoResponse {
    let request: VerifyRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let session = match auth::verify_secret(&admin, &request.account_id, &request.password).await {
        Ok(session) => session,
        Err(error) => {
            return (super::error_status(&error), error.to_string()).into_response();
        }
    };

    let cookie = match super::session_cookie(&session.secret) {
        Ok(cookie) => cookie,
        Err(e) => {
            error!("Failed to build session cookie: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to establish session".to_string(),
            )
                .into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    (
        StatusCode::OK,
        headers,
        Json(json!({ "sessionId": session.session_id })),
    )
        .into_response()
}
