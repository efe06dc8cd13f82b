//! Lock Account Use Case
//!
//! Administrative lock: opens the standard lock window against the account
//! regardless of its failure counter.

use chrono::Utc;

use crate::application::authorize;
use crate::application::request::{self, FieldMap};
use crate::application::result::Outcome;
use crate::domain::lockout::LockoutPolicy;
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

    authorize::ensure_admin(store, acting_admin, "Only administrators can lock accounts").await?;

    let until = LockoutPolicy::lock_expiry(Utc::now());
    let affected = store.set_lock(user_id, until).await?;
    if affected == 0 {
        return Err(OperationError::NotFound.into());
    }

    tracing::warn!(user_id = %user_id, until = %until, "Account locked by administrator");

    Ok(Outcome::ok("Account locked successfully"))
}
