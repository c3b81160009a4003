use crate::appwrite::AdminClient;
use crate::auth;
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct OtpRequest {
    pub email: String,
}

/// Bare OTP re-issuance. Each issuance supersedes the prior challenge for
/// the same email.
#[utoipa::path(
    post,
    path = "/v1/auth/otp",
    request_body = OtpRequest,
    responses (
        (status = 200, description = "OTP sent", body = String, content_type = "application/json"),
        (status = 400, description = "Missing payload or invalid email", body = String),
        (status = 502, description = "OTP issuance failed", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip(admin))]
pub async fn otp(
    admin: Extension<AdminClient>,
    payload: Option<Json<OtpRequest>>,
) -> impl IntoResponse {
    let request: OtpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !super::valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    match auth::send_email_otp(&admin, &request.email).await {
        Ok(account_id) => (StatusCode::OK, Json(json!({ "accountId": account_id }))).into_response(),
        Err(error) => (super::error_status(&error), error.to_string()).into_response(),
    }
}
