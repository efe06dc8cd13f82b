//! Administrator Authorization
//!
//! A privileged mutation must name an acting admin whose row carries the
//! administrator flag. An absent acting id is rejected outright; there is
//! no self-service path to privileged changes.

use crate::domain::repository::AccountStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{ErrorList, OperationError};

/// Resolve the acting admin id and require administrator privilege.
pub(crate) async fn ensure_admin<S: AccountStore>(
    store: &mut S,
    acting_admin: Option<UserId>,
    denied: &'static str,
) -> Result<(), ErrorList> {
    let Some(admin_id) = acting_admin else {
        return Err(OperationError::AuthorizationDenied(denied).into());
    };

    match store.is_admin(admin_id).await? {
        Some(true) => Ok(()),
        _ => Err(OperationError::AuthorizationDenied(denied).into()),
    }
}
