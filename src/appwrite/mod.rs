pub mod account;
pub mod databases;

use crate::{auth::error::AuthError, cli::globals::GlobalArgs};
use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const SESSION_HEADER: &str = "X-Appwrite-Session";

/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an unsupported scheme.
pub fn endpoint_url(url: &str, path: &str) -> Result<String> {
    let url = Url::parse(url)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

pub(crate) fn provider_error_message(json_response: &Value) -> &str {
    json_response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Elevated client, authenticated with the project API key. Used for
/// directory lookups, identity creation, OTP issuance and session minting.
/// Never hand it a user session and never expose it to untrusted callers.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    globals: GlobalArgs,
}

impl AdminClient {
    /// # Errors
    /// Returns an error if the project id or API key cannot be used as header
    /// values, or if the HTTP client cannot be built.
    pub fn new(globals: &GlobalArgs) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(PROJECT_HEADER, HeaderValue::from_str(&globals.project_id)?);

        let mut key = HeaderValue::from_str(globals.api_key.expose_secret())?;
        key.set_sensitive(true);
        headers.insert(KEY_HEADER, key);

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            globals: globals.clone(),
        })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn globals(&self) -> &GlobalArgs {
        &self.globals
    }
}

/// Client scoped to one user session token. Only self-lookup and sign-out
/// go through it.
#[derive(Debug, Clone)]
pub struct SessionClient {
    http: Client,
    globals: GlobalArgs,
}

impl SessionClient {
    /// Attach a caller-presented session token to a client.
    ///
    /// # Errors
    /// `SessionMissing` when no token is presented, `SessionInvalid` when the
    /// token cannot be attached. Both are terminal for the calling flow; the
    /// caller must re-authenticate.
    pub fn new(globals: &GlobalArgs, token: Option<&str>) -> Result<Self, AuthError> {
        let Some(token) = token.filter(|token| !token.is_empty()) else {
            warn!("Session missing or expired");
            return Err(AuthError::SessionMissing);
        };

        let mut headers = HeaderMap::new();

        let project = HeaderValue::from_str(&globals.project_id).map_err(|e| {
            error!("Failed to set project header: {e}");
            AuthError::SessionInvalid
        })?;
        headers.insert(PROJECT_HEADER, project);

        let mut session = HeaderValue::from_str(token).map_err(|e| {
            error!("Failed to set session: {e}");
            AuthError::SessionInvalid
        })?;
        session.set_sensitive(true);
        headers.insert(SESSION_HEADER, session);

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                error!("Failed to build session client: {e}");
                AuthError::SessionInvalid
            })?;

        Ok(Self {
            http,
            globals: globals.clone(),
        })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn globals(&self) -> &GlobalArgs {
        &self.globals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::globals::GlobalArgs;

    fn globals() -> GlobalArgs {
        let mut globals = GlobalArgs::new("https://identity.tld".to_string());
        globals.project_id = "depot".to_string();
        globals
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("https://identity.tld", "/v1/account").unwrap();
        assert_eq!(url, "https://identity.tld:443/v1/account");

        let url = endpoint_url("http://identity.tld", "/v1/account").unwrap();
        assert_eq!(url, "http://identity.tld:80/v1/account");

        let url = endpoint_url("http://identity.tld:8080", "/v1/account").unwrap();
        assert_eq!(url, "http://identity.tld:8080/v1/account");

        assert!(endpoint_url("ftp://identity.tld", "/v1/account").is_err());
        assert!(endpoint_url("not a url", "/v1/account").is_err());
    }

    #[test]
    fn test_provider_error_message() {
        let body = serde_json::json!({"message": "Invalid token", "code": 401});
        assert_eq!(provider_error_message(&body), "Invalid token");

        let body = serde_json::json!({"code": 500});
        assert_eq!(provider_error_message(&body), "");
    }

    #[test]
    fn test_session_client_requires_token() {
        let globals = globals();

        assert!(matches!(
            SessionClient::new(&globals, None),
            Err(AuthError::SessionMissing)
        ));
        assert!(matches!(
            SessionClient::new(&globals, Some("")),
            Err(AuthError::SessionMissing)
        ));
    }

    #[test]
    fn test_session_client_rejects_unusable_token() {
        let globals = globals();

        assert!(matches!(
            SessionClient::new(&globals, Some("bad\ntoken")),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_session_client_accepts_token() {
        let globals = globals();

        assert!(SessionClient::new(&globals, Some("a-session-secret")).is_ok());
    }
}
