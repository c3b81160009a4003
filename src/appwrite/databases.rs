use super::{endpoint_url, provider_error_message, AdminClient};
use crate::auth::models::UserIdentity;
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::{debug, info_span, Instrument};
use ulid::Ulid;

impl AdminClient {
    fn documents_url(&self) -> Result<String> {
        let globals = self.globals();
        endpoint_url(
            &globals.endpoint,
            &format!(
                "/v1/databases/{}/collections/{}/documents",
                globals.database_id, globals.users_collection_id
            ),
        )
    }

    /// Query the user directory for an exact attribute match. First match
    /// wins when the result set is non-empty.
    ///
    /// # Errors
    /// Returns an error if the provider request fails, the provider returns a
    /// non-success status, or the response is missing expected fields.
    pub async fn find_user_document(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Option<UserIdentity>> {
        let url = self.documents_url()?;

        let query = serde_json::to_string(&json!({
            "method": "equal",
            "attribute": attribute,
            "values": [value],
        }))?;

        let span = info_span!(
            "appwrite.list_documents",
            http.method = "GET",
            url = %url,
            attribute = %attribute
        );
        let response = self
            .http()
            .get(&url)
            .query(&[("queries[]", query.as_str())])
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

        let total = json_response
            .get("total")
            .and_then(Value::as_u64)
            .ok_or_else(|| anyhow!("Error parsing JSON response: no total found"))?;

        if total == 0 {
            return Ok(None);
        }

        let document = json_response
            .get("documents")
            .and_then(|v| v.get(0))
            .cloned()
            .ok_or_else(|| anyhow!("Error parsing JSON response: no documents found"))?;

        let user: UserIdentity = serde_json::from_value(document)?;

        Ok(Some(user))
    }

    /// Create a directory document for a freshly provisioned identity.
    ///
    /// # Errors
    /// Returns an error if the provider request fails or returns a
    /// non-success status.
    pub async fn create_user_document(
        &self,
        full_name: &str,
        email: &str,
        account_id: &str,
    ) -> Result<UserIdentity> {
        let url = self.documents_url()?;

        let payload = json!({
            "documentId": Ulid::new().to_string(),
            "data": {
                "fullName": full_name,
                "email": email,
                "avatar": self.globals().avatar_url,
                "accountId": account_id,
            },
        });

        let span = info_span!(
            "appwrite.create_document",
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
        let user: UserIdentity = serde_json::from_value(json_response)?;

        debug!("Created directory document for {}", user.email);

        Ok(user)
    }
}
