pub mod error;
pub mod models;

use crate::appwrite::{AdminClient, SessionClient};
use crate::cli::globals::GlobalArgs;
use error::AuthError;
use models::{CreatedAccount, SignIn, UserIdentity, VerifiedSession};
use tracing::{debug, error, instrument, warn};
use ulid::Ulid;

/// Resolve an email to at most one directory identity. Side-effect free.
///
/// # Errors
/// `DirectoryLookup` when the directory query fails.
#[instrument(skip(admin))]
pub async fn get_user_by_email(
    admin: &AdminClient,
    email: &str,
) -> Result<Option<UserIdentity>, AuthError> {
    admin.find_user_document("email", email).await.map_err(|e| {
        error!("Failed to query user directory: {e}");
        AuthError::DirectoryLookup(e.to_string())
    })
}

/// Issue a one-time passcode for `email` against a fresh correlation id.
/// Returns the provider account id; verification must quote it back.
///
/// # Errors
/// `OtpIssuance` when the provider refuses or returns no id.
#[instrument(skip(admin))]
pub async fn send_email_otp(admin: &AdminClient, email: &str) -> Result<String, AuthError> {
    let correlation_id = Ulid::new().to_string();

    admin
        .create_email_token(&correlation_id, email)
        .await
        .map_err(|e| {
            error!("Failed to send email OTP: {e}");
            AuthError::OtpIssuance(e.to_string())
        })
}

/// Provision an identity for `email`, issuing an OTP either way.
///
/// The OTP doubles as inbox-ownership proof, so it goes out before the
/// directory write. A repeat call for the same email issues a second OTP but
/// never a second directory document.
///
/// # Errors
/// `DirectoryLookup`, `OtpIssuance` or `DirectoryWrite`, all fatal to the
/// call.
#[instrument(skip(admin))]
pub async fn create_account(
    admin: &AdminClient,
    full_name: &str,
    email: &str,
) -> Result<CreatedAccount, AuthError> {
    let existing_user = get_user_by_email(admin, email).await?;

    let account_id = send_email_otp(admin, email).await?;

    if existing_user.is_none() {
        admin
            .create_user_document(full_name, email, &account_id)
            .await
            .map_err(|e| {
                error!("Failed to create directory document: {e}");
                AuthError::DirectoryWrite(e.to_string())
            })?;
    }

    Ok(CreatedAccount { account_id })
}

/// Exchange a submitted passcode plus its pending account id for a session.
/// On failure no session state exists anywhere; the caller sets no cookie.
///
/// # Errors
/// `OtpVerification` on a wrong code, expired challenge or provider error.
#[instrument(skip(admin, password))]
pub async fn verify_secret(
    admin: &AdminClient,
    account_id: &str,
    password: &str,
) -> Result<VerifiedSession, AuthError> {
    let session = admin
        .create_session(account_id, password)
        .await
        .map_err(|e| {
            error!("Failed to verify OTP: {e}");
            AuthError::OtpVerification(e.to_string())
        })?;

    debug!("Session {} established for {}", session.id, account_id);

    Ok(VerifiedSession {
        session_id: session.id,
        secret: session.secret,
    })
}

/// Re-issue an OTP for an existing identity, or report absence. Never
/// creates an identity; that is `create_account`'s job alone.
///
/// # Errors
/// `DirectoryLookup` or `OtpIssuance`; "User not found" is a reported
/// outcome, not an error.
#[instrument(skip(admin))]
pub async fn sign_in_user(admin: &AdminClient, email: &str) -> Result<SignIn, AuthError> {
    match get_user_by_email(admin, email).await? {
        Some(existing_user) => {
            send_email_otp(admin, email).await?;

            Ok(SignIn {
                account_id: Some(existing_user.account_id),
                error: None,
            })
        }
        None => Ok(SignIn {
            account_id: None,
            error: Some("User not found".to_string()),
        }),
    }
}

/// Resolve the caller's identity from a session token.
///
/// Every failure mode collapses to `None`: a missing or rejected token, a
/// provider error, or an account with no directory document (provider and
/// directory out of sync). "Not authenticated" is an expected outcome here,
/// never an error.
#[instrument(skip(globals, token))]
pub async fn current_user(globals: &GlobalArgs, token: Option<&str>) -> Option<UserIdentity> {
    let session = match SessionClient::new(globals, token) {
        Ok(session) => session,
        Err(e) => {
            warn!("No current user: {e}");
            return None;
        }
    };

    let account = match session.get().await {
        Ok(account) => account,
        Err(e) => {
            warn!("Failed to fetch current account: {e}");
            return None;
        }
    };

    let admin = match AdminClient::new(globals) {
        Ok(admin) => admin,
        Err(e) => {
            error!("Failed to build admin client: {e}");
            return None;
        }
    };

    match admin.find_user_document("accountId", &account.id).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            warn!("No directory document for account {}", account.id);
            None
        }
        Err(e) => {
            warn!("Failed to look up current user: {e}");
            None
        }
    }
}

/// Tear down the caller's session, best effort. Failures are logged and
/// swallowed; the HTTP layer redirects to sign-in no matter what happened
/// here.
#[instrument(skip(globals, token))]
pub async fn sign_out(globals: &GlobalArgs, token: Option<&str>) {
    match SessionClient::new(globals, token) {
        Ok(session) => {
            if let Err(e) = session.delete_session("current").await {
                warn!("Failed to delete remote session: {e}");
            }
        }
        Err(e) => warn!("Sign-out without a usable session: {e}"),
    }
}
