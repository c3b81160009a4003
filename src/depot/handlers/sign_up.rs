use crate::appwrite::AdminClient;
use crate::auth;
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignUpRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/v1/auth/sign-up",
    request_body = SignUpRequest,
    responses (
        (status = 201, description = "Account provisioned, OTP sent", body = crate::auth::models::CreatedAccount, content_type = "application/json"),
        (status = 400, description = "Missing payload or invalid email", body = String),
        (status = 502, description = "Identity provider failure", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip(admin))]
pub async fn sign_up(
    admin: Extension<AdminClient>,
    payload: Option<Json<SignUpRequest>>,
) -> impl IntoResponse {
    let request: SignUpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !super::valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    match auth::create_account(&admin, &request.full_name, &request.email).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(error) => (super::error_status(&error), error.to_string()).into_response(),
    }
}
