//! SQLite Repository Implementation

use chrono::{DateTime, Utc};
use platform::password::PasswordDigest;
use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, Transaction};

use crate::domain::entity::user::{NewUser, User, UserChangeSet};
use crate::domain::repository::{AccountStore, LockoutSnapshot};
use crate::domain::value_object::{email::Email, profile::ProfileData, user_id::UserId};
use crate::error::{AccountResult, OperationError};

/// SQLite-backed account store
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the transaction scoping one dispatcher call.
    pub async fn begin(&self) -> AccountResult<SqliteStoreTx> {
        Ok(SqliteStoreTx {
            tx: self.pool.begin().await?,
        })
    }
}

/// Transaction-scoped store handle.
///
/// Dropping the handle without calling [`commit`](Self::commit) rolls the
/// transaction back, so every exit path releases the connection.
pub struct SqliteStoreTx {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteStoreTx {
    pub async fn commit(self) -> AccountResult<()> {
        Ok(self.tx.commit().await?)
    }

    pub async fn rollback(self) -> AccountResult<()> {
        Ok(self.tx.rollback().await?)
    }
}

impl AccountStore for SqliteStoreTx {
    async fn find_id_by_username_or_email(
        &mut self,
        username: &str,
        email: &str,
    ) -> AccountResult<Option<UserId>> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM users WHERE username = ?1 OR email = ?2",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(id.map(UserId::new))
    }

    async fn find_by_id(&mut self, id: UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_digest,
                is_active,
                is_admin,
                created_at,
                last_login,
                failed_login_attempts,
                account_locked_until,
                profile_data
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&mut self, username: &str) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_digest,
                is_active,
                is_admin,
                created_at,
                last_login,
                failed_login_attempts,
                account_locked_until,
                profile_data
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn is_admin(&mut self, id: UserId) -> AccountResult<Option<bool>> {
        let flag = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = ?1")
            .bind(id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(flag)
    }

    async fn email_taken_by_other(&mut self, email: &str, id: UserId) -> AccountResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1 AND id != ?2)",
        )
        .bind(email)
        .bind(id.as_i64())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(taken)
    }

    async fn insert(&mut self, user: &NewUser) -> AccountResult<UserId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                username,
                email,
                password_digest,
                is_active,
                is_admin,
                created_at,
                failed_login_attempts,
                profile_data
            ) VALUES (?1, ?2, ?3, TRUE, ?4, ?5, 0, ?6)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(user.password_digest.as_str())
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.profile.to_text())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Username or email already exists"))?;

        Ok(UserId::new(id))
    }

    async fn update_fields(&mut self, id: UserId, changes: &UserChangeSet) -> AccountResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = COALESCE(?2, email),
                password_digest = COALESCE(?3, password_digest),
                is_admin = COALESCE(?4, is_admin),
                profile_data = COALESCE(?5, profile_data)
            WHERE id = ?1
            "#,
        )
        .bind(id.as_i64())
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.password_digest.as_ref().map(PasswordDigest::as_str))
        .bind(changes.is_admin)
        .bind(changes.profile.as_ref().map(ProfileData::to_text))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already exists"))?;

        Ok(result.rows_affected())
    }

    async fn delete(&mut self, id: UserId) -> AccountResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn record_login(&mut self, id: UserId, at: DateTime<Utc>) -> AccountResult<()> {
        sqlx::query(
            "UPDATE users SET last_login = ?2, failed_login_attempts = 0 WHERE id = ?1",
        )
        .bind(id.as_i64())
        .bind(at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn record_failed_attempt(
        &mut self,
        id: UserId,
        lock_threshold: i64,
        lock_until: DateTime<Utc>,
    ) -> AccountResult<LockoutSnapshot> {
        // Increment and lock transition in one statement; concurrent
        // failed attempts on the same row cannot lose updates.
        let row = sqlx::query_as::<_, LockoutRow>(
            r#"
            UPDATE users SET
                failed_login_attempts = failed_login_attempts + 1,
                account_locked_until = CASE
                    WHEN failed_login_attempts + 1 >= ?2 THEN ?3
                    ELSE account_locked_until
                END
            WHERE id = ?1
            RETURNING failed_login_attempts, account_locked_until
            "#,
        )
        .bind(id.as_i64())
        .bind(lock_threshold)
        .bind(lock_until)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(LockoutSnapshot {
            failed_login_attempts: row.failed_login_attempts,
            account_locked_until: row.account_locked_until,
        })
    }

    async fn clear_lock(&mut self, id: UserId) -> AccountResult<u64> {
        let result = sqlx::query(
            "UPDATE users SET account_locked_until = NULL, failed_login_attempts = 0 WHERE id = ?1",
        )
        .bind(id.as_i64())
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_lock(&mut self, id: UserId, until: DateTime<Utc>) -> AccountResult<u64> {
        let result = sqlx::query("UPDATE users SET account_locked_until = ?2 WHERE id = ?1")
            .bind(id.as_i64())
            .bind(until)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Map a unique-constraint violation to `Conflict`; anything else is a
/// store failure.
fn conflict_on_unique(e: sqlx::Error, message: &'static str) -> OperationError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => OperationError::Conflict(message),
        _ => OperationError::Store(e),
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_digest: String,
    is_active: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
    failed_login_attempts: i64,
    account_locked_until: Option<DateTime<Utc>>,
    profile_data: Option<String>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let profile = match self.profile_data {
            None => ProfileData::empty(),
            Some(text) => ProfileData::from_text(&text)
                .map_err(|e| OperationError::Store(sqlx::Error::Decode(Box::new(e))))?,
        };

        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            email: Email::from_db(self.email),
            password_digest: PasswordDigest::from_stored(self.password_digest),
            is_active: self.is_active,
            is_admin: self.is_admin,
            created_at: self.created_at,
            last_login: self.last_login,
            failed_login_attempts: self.failed_login_attempts,
            account_locked_until: self.account_locked_until,
            profile,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LockoutRow {
    failed_login_attempts: i64,
    account_locked_until: Option<DateTime<Utc>>,
}
