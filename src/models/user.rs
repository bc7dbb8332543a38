use serde::Serialize;
use sqlx::FromRow;

/// A registered account. Created at sign-up, never mutated or deleted.
#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// bcrypt hash, never the raw password; kept out of every payload.
    #[serde(skip_serializing)]
    pub password_hash: String,
}
