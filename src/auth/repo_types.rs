use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Account role. Pure data: nothing enforces permissions off it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// User record in the database.
///
/// `verification_code` and `code_expiry` are paired: both set while a
/// verification is pending, both cleared when it succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub role: UserRole,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,
    #[serde(skip_serializing)]
    pub code_expiry: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

/// Fields needed to insert a fresh, unverified account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub role: UserRole,
    pub email: String,
    pub password_hash: String,
    pub verification_code: String,
    pub code_expiry: OffsetDateTime,
}
