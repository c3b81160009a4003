use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A directory document. At most one per distinct email; never mutated or
/// deleted by this service.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct UserIdentity {
    /// Directory document id, not the provider account id.
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    /// Join key between the directory, pending OTP challenges and sessions.
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Correlation token handed back after provisioning; the caller still has to
/// complete OTP verification to obtain a session.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreatedAccount {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Outcome of sign-in resolution. "User not found" is a reported result,
/// not a failure.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignIn {
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A freshly minted session. The secret goes into the session cookie and is
/// never serialized into a response body.
#[derive(Debug)]
pub struct VerifiedSession {
    pub session_id: String,
    pub secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_identity_from_provider_document() {
        let document = json!({
            "$id": "doc-1",
            "$collectionId": "users",
            "$createdAt": "2026-01-01T00:00:00.000+00:00",
            "fullName": "Ann",
            "email": "a@x.com",
            "avatar": "https://depot.example/avatar.png",
            "accountId": "account-1"
        });

        let user: UserIdentity = serde_json::from_value(document).unwrap();
        assert_eq!(user.id, "doc-1");
        assert_eq!(user.full_name, "Ann");
        assert_eq!(user.account_id, "account-1");
    }

    #[test]
    fn test_sign_in_absence_shape() {
        let outcome = SignIn {
            account_id: None,
            error: Some("User not found".to_string()),
        };
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body, json!({"accountId": null, "error": "User not found"}));

        let outcome = SignIn {
            account_id: Some("account-1".to_string()),
            error: None,
        };
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body, json!({"accountId": "account-1"}));
    }
}
