use thiserror::Error;

/// Failure taxonomy for the account/session actions.
///
/// `SessionMissing` and `SessionInvalid` mean "not logged in" and force
/// re-authentication; the rest are provider failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no session found")]
    SessionMissing,
    #[error("invalid session")]
    SessionInvalid,
    #[error("failed to send email OTP: {0}")]
    OtpIssuance(String),
    #[error("failed to verify OTP: {0}")]
    OtpVerification(String),
    #[error("failed to query user directory: {0}")]
    DirectoryLookup(String),
    #[error("failed to write user directory: {0}")]
    DirectoryWrite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::SessionMissing.to_string(), "no session found");
        assert_eq!(AuthError::SessionInvalid.to_string(), "invalid session");
        assert_eq!(
            AuthError::OtpIssuance("boom".to_string()).to_string(),
            "failed to send email OTP: boom"
        );
        assert_eq!(
            AuthError::OtpVerification("wrong code".to_string()).to_string(),
            "failed to verify OTP: wrong code"
        );
    }
}
