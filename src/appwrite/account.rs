use super::{endpoint_url, provider_error_message, AdminClient, SessionClient};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::{debug, info_span, Instrument};

/// Provider-held session credential. The secret is what ends up in the
/// session cookie; the id is what the caller gets back.
#[derive(Debug)]
pub struct ProviderSession {
    pub id: String,
    pub secret: String,
}

/// The provider's notion of the account behind a session token.
#[derive(Debug)]
pub struct ProviderAccount {
    pub id: String,
}

impl AdminClient {
    /// Request a one-time passcode for `email`, correlated by `user_id`.
    /// Returns the provider-assigned account id tying verification to this
    /// email.
    ///
    /// # Errors
    /// Returns an error if the provider request fails, the provider returns a
    /// non-success status, or the response is missing expected fields.
    pub async fn create_email_token(&self, user_id: &str, email: &str) -> Result<String> {
        let url = endpoint_url(&self.globals().endpoint, "/v1/account/tokens/email")?;

        let payload = json!({
            "userId": user_id,
            "email": email,
        });

        let span = info_span!(
            "appwrite.create_email_token",
            http.method = "POST",
            url = %url
        );
        let response = self
            .http()
            .post(&url)
            .json(&payload)
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                provider_error_message(&json_response)
            ));
        }

        let json_response: Value = response.json().await?;
        let account_id = json_response
            .get("userId")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Error parsing JSON response: no userId found"))?;

        Ok(account_id.to_string())
    }

    /// Exchange a pending account id plus submitted passcode for a session.
    ///
    /// # Errors
    /// Returns an error if the provider request fails, the passcode is
    /// rejected, or the response is missing expected fields.
    pub async fn create_session(&self, account_id: &str, secret: &str) -> Result<ProviderSession> {
        let url = endpoint_url(&self.globals().endpoint, "/v1/account/sessions/token")?;

        let payload = json!({
            "userId": account_id,
            "secret": secret,
        });

        let span = info_span!(
            "appwrite.create_session",
            http.method = "POST",
            url = %url
        );
        let response = self
            .http()
            .post(&url)
            .json(&payload)
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                provider_error_message(&json_response)
            ));
        }

        let json_response: Value = response.json().await?;

        let id = json_response
            .get("$id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Error parsing JSON response: no $id found"))?;

        let secret = json_response
            .get("secret")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Error parsing JSON response: no secret found"))?;

        Ok(ProviderSession {
            id: id.to_string(),
            secret: secret.to_string(),
        })
    }
}

impl SessionClient {
    /// Fetch the account behind the attached session token.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the token or the response is
    /// missing expected fields.
    pub async fn get(&self) -> Result<ProviderAccount> {
        let url = endpoint_url(&self.globals().endpoint, "/v1/account")?;

        let span = info_span!(
            "appwrite.account_get",
            http.method = "GET",
            url = %url
        );
        let response = self.http().get(&url).send().instrument(span).await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                provider_error_message(&json_response)
            ));
        }

        let json_response: Value = response.json().await?;
        let id = json_response
            .get("$id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Error parsing JSON response: no $id found"))?;

        Ok(ProviderAccount { id: id.to_string() })
    }

    /// Delete a session on the provider side. Pass `"current"` for the
    /// session the client was built from.
    ///
    /// # Errors
    /// Returns an error if the provider request fails or returns a
    /// non-success status.
    pub async fn delete_session(&self, session_ref: &str) -> Result<()> {
        let url = endpoint_url(
            &self.globals().endpoint,
            &format!("/v1/account/sessions/{session_ref}"),
        )?;

        let span = info_span!(
            "appwrite.delete_session",
            http.method = "DELETE",
            url = %url
        );
        let response = self.http().delete(&url).send().instrument(span).await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                provider_error_message(&json_response)
            ));
        }

        debug!("Deleted session {}", session_ref);

        Ok(())
    }
}
