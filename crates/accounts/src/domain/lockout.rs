//! Login Lockout Policy
//!
//! Repeated failed authentications lock an account for a fixed window.
//! The policy is pure: it classifies recorded lock state and computes
//! expiries. The counter increment itself is applied by the store as one
//! conditional update, so concurrent failed attempts cannot lose updates.

use chrono::{DateTime, Duration, Utc};

/// Lock state of an account at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// No lock recorded
    Unlocked,
    /// A lock is recorded but its window has passed
    Expired,
    /// The lock window is still open
    Locked,
}

/// Fixed lockout policy: five failed attempts lock the account for thirty
/// minutes.
pub struct LockoutPolicy;

impl LockoutPolicy {
    /// Failed attempts that trigger a lock
    pub const MAX_FAILED_ATTEMPTS: i64 = 5;
    /// Lock window in minutes
    pub const LOCKOUT_MINUTES: i64 = 30;

    /// Classify the recorded lock against `now`.
    pub fn state(locked_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> LockState {
        match locked_until {
            None => LockState::Unlocked,
            Some(until) if until <= now => LockState::Expired,
            Some(_) => LockState::Locked,
        }
    }

    /// Expiry for a lock starting at `now`.
    pub fn lock_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(Self::LOCKOUT_MINUTES)
    }

    /// Whether a failure count has reached the lock threshold.
    pub fn locks_out(failed_attempts: i64) -> bool {
        failed_attempts >= Self::MAX_FAILED_ATTEMPTS
    }
}
