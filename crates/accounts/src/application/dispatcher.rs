//! Operation Dispatcher
//!
//! Single entry point over the account store. Validates the request shape,
//! routes to the use case for the operation kind, and settles the per-call
//! transaction: commit when the use case produced an outcome, rollback when
//! it failed with errors. Every domain failure lands in the result's error
//! list; nothing panics across this boundary.

use crate::application::config::DirectoryConfig;
use crate::application::request::{FieldMap, OperationKind};
use crate::application::result::{OperationResult, Outcome};
use crate::application::{
    authenticate, create_user, delete_user, lock_account, reset_password, unlock_account,
    update_user,
};
use crate::domain::value_object::user_id::UserId;
use crate::error::{ErrorList, OperationError};
use crate::infra::sqlite::SqliteAccountStore;

/// Account directory service. One transaction per operation call; no
/// mutable state is held between calls.
pub struct UserDirectory {
    store: SqliteAccountStore,
    config: DirectoryConfig,
}

impl UserDirectory {
    pub fn new(store: SqliteAccountStore) -> Self {
        Self::with_config(store, DirectoryConfig::default())
    }

    pub fn with_config(store: SqliteAccountStore, config: DirectoryConfig) -> Self {
        Self { store, config }
    }

    /// Execute one operation.
    ///
    /// All store access happens inside a single transaction. It commits
    /// when the operation reaches a success path (including a recorded
    /// authentication rejection, whose lockout bookkeeping must survive)
    /// and is rolled back on every other exit.
    pub async fn operate(
        &self,
        fields: FieldMap,
        kind: OperationKind,
        acting_admin: Option<UserId>,
    ) -> OperationResult {
        if fields.is_empty() {
            return fail(
                OperationError::InvalidInput("Invalid user data provided".to_string()).into(),
            );
        }

        let mut tx = match self.store.begin().await {
            Ok(tx) => tx,
            Err(e) => return fail(e.into()),
        };

        let outcome = match kind {
            OperationKind::Create => create_user::run(&mut tx, &self.config, &fields).await,
            OperationKind::Update => {
                update_user::run(&mut tx, &self.config, &fields, acting_admin).await
            }
            OperationKind::Delete => delete_user::run(&mut tx, &fields, acting_admin).await,
            OperationKind::Authenticate => authenticate::run(&mut tx, &self.config, &fields).await,
            OperationKind::ResetPassword => {
                reset_password::run(&mut tx, &self.config, &fields, acting_admin).await
            }
            OperationKind::LockAccount => lock_account::run(&mut tx, &fields, acting_admin).await,
            OperationKind::UnlockAccount => {
                unlock_account::run(&mut tx, &fields, acting_admin).await
            }
        };

        match outcome {
            Ok(outcome) => match tx.commit().await {
                Ok(()) => settle(outcome),
                Err(e) => fail(e.into()),
            },
            Err(errors) => {
                if let Err(e) = tx.rollback().await {
                    e.log();
                }
                fail(errors)
            }
        }
    }

    /// As [`operate`](Self::operate), with the operation kind supplied by
    /// name. Unknown names fail with InvalidInput. The field map is checked
    /// before the name, so an empty request reports the request problem.
    pub async fn operate_named(
        &self,
        fields: FieldMap,
        kind: &str,
        acting_admin: Option<UserId>,
    ) -> OperationResult {
        if fields.is_empty() {
            return fail(
                OperationError::InvalidInput("Invalid user data provided".to_string()).into(),
            );
        }
        match kind.parse::<OperationKind>() {
            Ok(kind) => self.operate(fields, kind, acting_admin).await,
            Err(e) => fail(e.into()),
        }
    }
}

fn settle(outcome: Outcome) -> OperationResult {
    if outcome.errors.is_empty() {
        OperationResult::succeeded(outcome.message, outcome.data)
    } else {
        for error in &outcome.errors {
            error.log();
        }
        OperationResult::failed(outcome.errors)
    }
}

fn fail(errors: ErrorList) -> OperationResult {
    let errors = errors.into_vec();
    for error in &errors {
        error.log();
    }
    OperationResult::failed(errors)
}
