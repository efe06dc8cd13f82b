//! Account Directory Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, validation rules, lockout policy,
//!   repository trait
//! - `application/` - Use cases and the operation dispatcher
//! - `infra/` - Database implementations
//!
//! ## Features
//! - Account creation with email and password-strength validation
//! - Partial updates applied as one combined write
//! - Credential authentication with failed-attempt lockout
//! - Single-step password reset and administrative lock control
//! - Admin-only privileged mutations (admin flag changes, deletion)
//!
//! ## Security Model
//! - Password digests are versioned: legacy unsalted SHA-256 for store
//!   compatibility, salted Argon2id for migrated rows
//! - Authentication failures never reveal whether the username exists
//! - Five failed attempts lock the account for thirty minutes
//! - Lockout bookkeeping is applied as a single conditional update, so
//!   concurrent failed attempts cannot lose increments

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::config::DirectoryConfig;
pub use application::dispatcher::UserDirectory;
pub use application::request::{FieldMap, OperationKind};
pub use application::result::{OperationData, OperationResult};
pub use error::{AccountResult, OperationError};
pub use infra::sqlite::SqliteAccountStore;
