//! Update User Use Case
//!
//! Collects every recognized field into a change set first, aborting the
//! whole call on the first failing field; the write happens once, as a
//! single combined update. No partial writes are ever issued.

use platform::password::{ClearTextPassword, PasswordDigest};

use crate::application::authorize;
use crate::application::config::DirectoryConfig;
use crate::application::request::{self, FieldMap};
use crate::application::result::Outcome;
use crate::domain::entity::user::UserChangeSet;
use crate::domain::repository::AccountStore;
use crate::domain::validation::{MIN_PASSWORD_LENGTH, PasswordRule};
use crate::domain::value_object::{email::Email, profile::ProfileData, user_id::UserId};
use crate::error::{ErrorList, OperationError};

pub(crate) async fn run<S: AccountStore>(
    store: &mut S,
    config: &DirectoryConfig,
    fields: &FieldMap,
    acting_admin: Option<UserId>,
) -> Result<Outcome, ErrorList> {
    let Some(user_id) = request::int_field(fields, "user_id").map(UserId::new) else {
        return Err(OperationError::MissingField("user_id").into());
    };

    if store.find_by_id(user_id).await?.is_none() {
        return Err(OperationError::NotFound.into());
    }

    let mut changes = UserChangeSet::default();

    if let Some(value) = fields.get("email") {
        let email = value
            .as_str()
            .ok_or(OperationError::InvalidEmailFormat)
            .and_then(|raw| Email::new(raw).map_err(|_| OperationError::InvalidEmailFormat))?;
        if store.email_taken_by_other(email.as_str(), user_id).await? {
            return Err(OperationError::Conflict("Email already exists").into());
        }
        changes.email = Some(email);
    }

    if let Some(value) = fields.get("password") {
        let Some(raw) = value.as_str() else {
            return Err(
                OperationError::InvalidInput("Password must be a string".to_string()).into(),
            );
        };
        // Partial validation: length only on this path
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(OperationError::WeakPassword(PasswordRule::TooShort).into());
        }
        let digest =
            PasswordDigest::compute(&ClearTextPassword::new(raw), config.digest_scheme, config.pepper())
                .map_err(|e| OperationError::Internal(e.to_string()))?;
        changes.password_digest = Some(digest);
    }

    if let Some(value) = fields.get("is_admin") {
        let Some(is_admin) = value.as_bool() else {
            return Err(
                OperationError::InvalidInput("is_admin must be a boolean".to_string()).into(),
            );
        };
        authorize::ensure_admin(
            store,
            acting_admin,
            "Only administrators can modify admin status",
        )
        .await?;
        changes.is_admin = Some(is_admin);
    }

    if let Some(value) = fields.get("profile") {
        changes.profile = Some(ProfileData::new(value.clone()));
    }

    if changes.is_empty() {
        return Ok(Outcome::ok("No fields to update"));
    }

    let affected = store.update_fields(user_id, &changes).await?;
    if affected == 0 {
        return Err(OperationError::NotFound.into());
    }

    tracing::info!(user_id = %user_id, "User updated");

    Ok(Outcome::ok("User updated successfully"))
}
