//! User Entity
//!
//! The persisted account row plus the payload shapes the store consumes:
//! `NewUser` for inserts and `UserChangeSet` for partial updates.

use chrono::{DateTime, Utc};
use platform::password::PasswordDigest;

use crate::domain::value_object::{email::Email, profile::ProfileData, user_id::UserId};

/// Persisted user account row
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: Email,
    /// One-way credential digest, never the plaintext
    pub password_digest: PasswordDigest,
    /// Deactivated accounts cannot authenticate
    pub is_active: bool,
    /// Administrator privilege flag
    pub is_admin: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last successful authentication
    pub last_login: Option<DateTime<Utc>>,
    /// Consecutive failed authentication count
    pub failed_login_attempts: i64,
    /// Open lock window, if any
    pub account_locked_until: Option<DateTime<Utc>>,
    /// Opaque profile attributes
    pub profile: ProfileData,
}

/// Insert payload for a new account row
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub is_admin: bool,
    pub profile: ProfileData,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: String, email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            username,
            email,
            password_digest,
            is_admin: false,
            profile: ProfileData::empty(),
            created_at: Utc::now(),
        }
    }
}

/// The subset of update-eligible attributes present in one request, each
/// carrying its validated new value. Consumed by a single parameterized
/// update; never assembled into SQL from user-controlled keys.
#[derive(Debug, Default)]
pub struct UserChangeSet {
    pub email: Option<Email>,
    pub password_digest: Option<PasswordDigest>,
    pub is_admin: Option<bool>,
    pub profile: Option<ProfileData>,
}

impl UserChangeSet {
    /// True when no recognized field was present in the request.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_digest.is_none()
            && self.is_admin.is_none()
            && self.profile.is_none()
    }
}
