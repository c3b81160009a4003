pub mod health;
pub use self::health::health;

pub mod sign_up;
pub use self::sign_up::sign_up;

pub mod otp;
pub use self::otp::otp;

pub mod sign_in;
pub use self::sign_in::sign_in;

pub mod verify;
pub use self::verify::verify;

pub mod me;
pub use self::me::me;

pub mod sign_out;
pub use self::sign_out::sign_out;

// common functions for the handlers
use crate::auth::error::AuthError;
use axum::http::{header::InvalidHeaderValue, HeaderMap, HeaderValue, StatusCode};
use regex::Regex;

/// The sole artifact of an authenticated browser context.
pub const SESSION_COOKIE_NAME: &str = "appwrite-session";

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Session-scoped to the provider token lifetime, so no Max-Age.
pub(crate) fn session_cookie(secret: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={secret}; Path=/; HttpOnly; Secure; SameSite=Strict"
    ))
}

pub(crate) fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "appwrite-session=; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age=0",
    )
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

pub(crate) fn error_status(error: &AuthError) -> StatusCode {
    match error {
        AuthError::SessionMissing | AuthError::SessionInvalid | AuthError::OtpVerification(_) => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::OtpIssuance(_)
        | AuthError::DirectoryLookup(_)
        | AuthError::DirectoryWrite(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn test_valid_email() {
        assert!(valid_email("a@x.com"));
        assert!(valid_email("ann+files@depot.example"));
        assert!(!valid_email("a@x"));
        assert!(!valid_email("not an email"));
        assert!(!valid_email("@x.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("session-secret").unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("appwrite-session=session-secret"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_clear_session_cookie_expires() {
        let cookie = clear_session_cookie();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("appwrite-session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_session_token() {
        let mut headers = HeaderMap::new();
        assert!(extract_session_token(&headers).is_none());

        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; appwrite-session=session-secret; lang=en"),
        );
        assert_eq!(
            extract_session_token(&headers).as_deref(),
            Some("session-secret")
        );

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            error_status(&AuthError::SessionMissing),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&AuthError::OtpVerification("wrong".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&AuthError::OtpIssuance("down".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&AuthError::DirectoryWrite("down".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
