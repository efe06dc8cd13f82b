//! Repository Trait
//!
//! Interface for account persistence. Implementation is in the
//! infrastructure layer. Every method runs on the transaction the
//! dispatcher opened for the current operation, which is why they take
//! `&mut self`.

use chrono::{DateTime, Utc};

use crate::domain::entity::user::{NewUser, User, UserChangeSet};
use crate::domain::value_object::user_id::UserId;
use crate::error::AccountResult;

/// Lockout counters after an atomically recorded failed attempt
#[derive(Debug, Clone, Copy)]
pub struct LockoutSnapshot {
    pub failed_login_attempts: i64,
    pub account_locked_until: Option<DateTime<Utc>>,
}

/// Account store trait
#[trait_variant::make(AccountStore: Send)]
pub trait LocalAccountStore {
    /// Find the id of a row matching either username or email
    async fn find_id_by_username_or_email(
        &mut self,
        username: &str,
        email: &str,
    ) -> AccountResult<Option<UserId>>;

    /// Find a full row by id
    async fn find_by_id(&mut self, id: UserId) -> AccountResult<Option<User>>;

    /// Find a full row by username
    async fn find_by_username(&mut self, username: &str) -> AccountResult<Option<User>>;

    /// Admin-flag projection for an id
    async fn is_admin(&mut self, id: UserId) -> AccountResult<Option<bool>>;

    /// Whether a different row already holds this email
    async fn email_taken_by_other(&mut self, email: &str, id: UserId) -> AccountResult<bool>;

    /// Insert a new row, returning the store-assigned id.
    /// A duplicate username or email surfaces as `Conflict`.
    async fn insert(&mut self, user: &NewUser) -> AccountResult<UserId>;

    /// Apply a change set as one combined update, returning rows affected.
    /// A duplicate email surfaces as `Conflict`.
    async fn update_fields(&mut self, id: UserId, changes: &UserChangeSet) -> AccountResult<u64>;

    /// Delete a row, returning rows affected
    async fn delete(&mut self, id: UserId) -> AccountResult<u64>;

    /// Record a successful login: reset the failure counter and stamp
    /// `last_login`
    async fn record_login(&mut self, id: UserId, at: DateTime<Utc>) -> AccountResult<()>;

    /// Atomically increment the failure counter, locking the row until
    /// `lock_until` when the new count reaches `lock_threshold`. Returns
    /// the counters as this statement left them.
    async fn record_failed_attempt(
        &mut self,
        id: UserId,
        lock_threshold: i64,
        lock_until: DateTime<Utc>,
    ) -> AccountResult<LockoutSnapshot>;

    /// Clear the lock and failure counter, returning rows affected
    async fn clear_lock(&mut self, id: UserId) -> AccountResult<u64>;

    /// Lock the row until the given time, returning rows affected
    async fn set_lock(&mut self, id: UserId, until: DateTime<Utc>) -> AccountResult<u64>;
}
