use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

/// Insert failure, split so callers can map the uniqueness conflict
/// without inspecting SQLSTATEs themselves.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistence seam for user accounts.
///
/// The store owns the email-uniqueness invariant: concurrent inserts with
/// the same normalized email must yield exactly one success.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new: NewUser) -> Result<User, InsertError>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Set `is_verified = true` and clear the pending code fields.
    async fn mark_verified(&self, id: Uuid) -> anyhow::Result<()>;
    /// Returns whether a row was actually removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Postgres-backed store. The unique index on `email` is what makes
/// `insert` race-safe.
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new: NewUser) -> Result<User, InsertError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (role, email, password_hash, verification_code, code_expiry)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, role, email, password_hash, is_verified,
                      verification_code, code_expiry, created_at
            "#,
        )
        .bind(new.role)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.verification_code)
        .bind(new.code_expiry)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => InsertError::DuplicateEmail,
            _ => InsertError::Other(e.into()),
        })?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, role, email, password_hash, is_verified,
                   verification_code, code_expiry, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, role, email, password_hash, is_verified,
                   verification_code, code_expiry, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_verified = TRUE, verification_code = NULL, code_expiry = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-memory store for tests. Enforces the same uniqueness invariant as
/// the Postgres unique index.
#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use time::OffsetDateTime;

    use super::*;

    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<HashMap<Uuid, User>>,
    }

    impl MemoryUserStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn insert(&self, new: NewUser) -> Result<User, InsertError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == new.email) {
                return Err(InsertError::DuplicateEmail);
            }
            let user = User {
                id: Uuid::new_v4(),
                role: new.role,
                email: new.email,
                password_hash: new.password_hash,
                is_verified: false,
                verification_code: Some(new.verification_code),
                code_expiry: Some(new.code_expiry),
                created_at: OffsetDateTime::now_utc(),
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&id).cloned())
        }

        async fn mark_verified(&self, id: Uuid) -> anyhow::Result<()> {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.get_mut(&id) {
                user.is_verified = true;
                user.verification_code = None;
                user.code_expiry = None;
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
            let mut users = self.users.lock().unwrap();
            Ok(users.remove(&id).is_some())
        }
    }
}
