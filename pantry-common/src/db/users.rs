//! User accounts and login sessions

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{parse_guid, parse_timestamp};
use crate::auth::{
    generate_salt, generate_session_token, hash_password, normalize_email, validate_email,
    validate_password, verify_password,
};
use crate::wall::PostAuthor;
use crate::{time, Error, Result};

/// Account as exposed to callers; credentials never leave this module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn author(&self) -> PostAuthor {
        PostAuthor {
            id: self.id,
            email: self.email.clone(),
        }
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        let guid: String = row.get("guid");
        let created_at: String = row.get("created_at");
        Ok(User {
            id: parse_guid(&guid)?,
            email: row.get("email"),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

/// Register a new account
///
/// Fails with `InvalidInput` for a malformed email or short password and with
/// `Conflict` when the email is already registered (case-insensitive).
pub async fn create_user(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    let email = validate_email(email)?;
    validate_password(password)?;

    let salt = generate_salt();
    let user = User {
        id: Uuid::new_v4(),
        email,
        created_at: time::now(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO users (guid, email, password_hash, password_salt, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id.to_string())
    .bind(&user.email)
    .bind(hash_password(password, &salt))
    .bind(&salt)
    .bind(time::to_rfc3339(user.created_at))
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!("Registered user {}", user.id);
            Ok(user)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(Error::Conflict(
            format!("An account already exists for {}", user.email),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_user(pool: &SqlitePool, user_id: Uuid) -> Result<Option<User>> {
    let row = sqlx::query("SELECT guid, email, created_at FROM users WHERE guid = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(User::from_row).transpose()
}

/// Check credentials; `None` for an unknown email or a wrong password
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT guid, email, created_at, password_hash, password_salt
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        debug!("Login attempt for unknown email");
        return Ok(None);
    };

    let hash: String = row.get("password_hash");
    let salt: String = row.get("password_salt");
    if !verify_password(password, &salt, &hash) {
        debug!("Login attempt with wrong password");
        return Ok(None);
    }

    User::from_row(&row).map(Some)
}

/// Issue a new session token for a user
pub async fn create_session(pool: &SqlitePool, user_id: Uuid) -> Result<String> {
    let token = generate_session_token();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id.to_string())
        .bind(time::now_rfc3339())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a bearer token to its user
pub async fn find_session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT u.guid, u.email, u.created_at
        FROM sessions s
        JOIN users u ON u.guid = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(User::from_row).transpose()
}

/// Revoke a session token; returns whether it existed
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
