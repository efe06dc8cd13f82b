//! Unlock Account Use Case
//!
//! Administrative unlock: clears the lock window and the failure counter.

use crate::application::authorize;
use crate::application::request::{self, FieldMap};
use crate::application::result::Outcome;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{ErrorList, OperationError};

pub(crate) async fn run<S: AccountStore>(
    store: &mut S,
    fields: &FieldMap,
    acting_admin: Option<UserId>,
) -> Result<Outcome, ErrorList> {
    let Some(user_id) = request::int_field(fields, "user_id").map(UserId::new) else {
        return Err(OperationError::MissingField("user_id").into());
    };

    authorize::ensure_admin(store, acting_admin, "Only administrators can unlock accounts")
        .await?;

    let affected = store.clear_lock(user_id).await?;
    if affected == 0 {
        return Err(OperationError::NotFound.into());
    }

    tracing::info!(user_id = %user_id, "Account unlocked by administrator");

    Ok(Outcome::ok("Account unlocked successfully"))
}
