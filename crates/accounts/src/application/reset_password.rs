//! Reset Password Use Case
//!
//! Single-step credential replacement: the caller either acts under an
//! administrator id or proves knowledge of the current password. A
//! successful reset also clears any lockout state.

use platform::password::{ClearTextPassword, PasswordDigest};

use crate::application::authorize;
use crate::application::config::DirectoryConfig;
use crate::application::request::{self, FieldMap};
use crate::application::result::Outcome;
use crate::domain::entity::user::UserChangeSet;
use crate::domain::repository::AccountStore;
use crate::domain::validation;
use crate::domain::value_object::user_id::UserId;
use crate::error::{ErrorList, OperationError};

const DENIED: &str = "Password reset requires an administrator or the current password";

pub(crate) async fn run<S: AccountStore>(
    store: &mut S,
    config: &DirectoryConfig,
    fields: &FieldMap,
    acting_admin: Option<UserId>,
) -> Result<Outcome, ErrorList> {
    let Some(user_id) = request::int_field(fields, "user_id").map(UserId::new) else {
        return Err(OperationError::MissingField("user_id").into());
    };
    let Some(password) = request::str_field(fields, "password") else {
        return Err(OperationError::MissingField("password").into());
    };

    let Some(user) = store.find_by_id(user_id).await? else {
        return Err(OperationError::NotFound.into());
    };

    match acting_admin {
        Some(_) => authorize::ensure_admin(store, acting_admin, DENIED).await?,
        None => {
            let proves_identity = request::str_field(fields, "current_password")
                .map(|current| {
                    user.password_digest
                        .verify(&ClearTextPassword::new(current), config.pepper())
                })
                .unwrap_or(false);
            if !proves_identity {
                return Err(OperationError::AuthorizationDenied(DENIED).into());
            }
        }
    }

    let violations = validation::password_violations(password);
    if !violations.is_empty() {
        return Err(violations
            .into_iter()
            .map(OperationError::WeakPassword)
            .collect());
    }

    let password_digest =
        PasswordDigest::compute(&ClearTextPassword::new(password), config.digest_scheme, config.pepper())
            .map_err(|e| OperationError::Internal(e.to_string()))?;

    let changes = UserChangeSet {
        password_digest: Some(password_digest),
        ..Default::default()
    };
    store.update_fields(user_id, &changes).await?;
    store.clear_lock(user_id).await?;

    tracing::info!(user_id = %user_id, "Password reset");

    Ok(Outcome::ok("Password reset successfully"))
}
