use crate::appwrite::AdminClient;
use crate::auth;
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignInRequest {
    pub email: String,
}

/// Sign-in resolution never provisions; an unknown email comes back as a
/// structured absence, not a failure.
#[utoipa::path(
    post,
    path = "/v1/auth/sign-in",
    request_body = SignInRequest,
    responses (
        (status = 200, description = "OTP re-issued, or user not found", body = crate::auth::models::SignIn, content_type = "application/json"),
        (status = 400, description = "Missing payload or invalid email", body = String),
        (status = 502, description = "Identity provider failure", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip(admin))]
pub async fn sign_in(
    admin: Extension<AdminClient>,
    payload: Option<Json<SignInRequest>>,
) -> impl IntoResponse {
    let request: SignInRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !super::valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    match auth::sign_in_user(&admin, &request.email).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => (super::error_status(&error), error.to_string()).into_response(),
    }
}
