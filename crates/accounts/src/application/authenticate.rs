//! Authenticate Use Case
//!
//! Verifies credentials under the lockout policy. Failed-credential
//! outcomes are rejections, not errors: their lockout bookkeeping must
//! commit, so they return `Ok` with the rejection recorded in the outcome.

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::DirectoryConfig;
use crate::application::request::{self, FieldMap};
use crate::application::result::{OperationData, Outcome};
use crate::domain::lockout::{LockState, LockoutPolicy};
use crate::domain::repository::AccountStore;
use crate::error::{ErrorList, OperationError};

pub(crate) async fn run<S: AccountStore>(
    store: &mut S,
    config: &DirectoryConfig,
    fields: &FieldMap,
) -> Result<Outcome, ErrorList> {
    let (username, password) = match (
        request::str_field(fields, "username"),
        request::str_field(fields, "password"),
    ) {
        (Some(username), Some(password)) => (username, password),
        (username, password) => {
            let mut errors = ErrorList::new();
            if username.is_none() {
                errors.push(OperationError::MissingField("username"));
            }
            if password.is_none() {
                errors.push(OperationError::MissingField("password"));
            }
            return Err(errors);
        }
    };

    // Never reveal whether it was the username or the password
    let Some(user) = store.find_by_username(username).await? else {
        return Ok(Outcome::rejected(OperationError::InvalidCredentials));
    };

    if !user.is_active {
        return Ok(Outcome::rejected(OperationError::AccountInactive));
    }

    let now = Utc::now();
    match LockoutPolicy::state(user.account_locked_until, now) {
        LockState::Locked => {
            // Still inside the lock window: no credential comparison
            return Ok(Outcome::rejected(OperationError::AccountLocked));
        }
        LockState::Expired => {
            // The window has passed; forget the old failures before
            // evaluating credentials
            store.clear_lock(user.id).await?;
        }
        LockState::Unlocked => {}
    }

    let plaintext = ClearTextPassword::new(password);
    if user.password_digest.verify(&plaintext, config.pepper()) {
        store.record_login(user.id, now).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "Authentication succeeded"
        );

        return Ok(Outcome::with_data(
            "Authentication successful",
            OperationData::Identity {
                user_id: user.id,
                username: user.username,
                email: user.email.into_db(),
            },
        ));
    }

    let snapshot = store
        .record_failed_attempt(
            user.id,
            LockoutPolicy::MAX_FAILED_ATTEMPTS,
            LockoutPolicy::lock_expiry(now),
        )
        .await?;

    if LockoutPolicy::locks_out(snapshot.failed_login_attempts) {
        tracing::warn!(
            user_id = %user.id,
            attempts = snapshot.failed_login_attempts,
            "Account locked after repeated failures"
        );
        return Ok(Outcome::rejected(OperationError::AccountLocked));
    }

    Ok(Outcome::rejected(OperationError::InvalidCredentials))
}
