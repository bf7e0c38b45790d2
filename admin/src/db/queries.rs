//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).
//!
//! Mutating queries take a `PgConnection` so callers can run them inside a
//! transaction (`&mut *tx`).

use sqlx::{PgConnection, PgPool};
use tracing::error;

use super::models::Account;

/// Log and return a database error with context.
macro_rules! db_error {
    ($query:expr, $($field:tt)*) => {
        |e| {
            error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
}

// ============================================================================
// Account Queries
// ============================================================================

/// Find account by username.
pub async fn find_account_by_username(
    pool: &PgPool,
    username: &str,
) -> sqlx::Result<Option<Account>> {
    sqlx::query_as::<_, Account>(
        "SELECT id, username, email, date_joined FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_account_by_username", username = %username))
}

/// Create a new account. Used to seed fixtures; the admin command never creates accounts.
#[doc(hidden)]
pub async fn create_account(
    pool: &PgPool,
    username: &str,
    email: Option<&str>,
) -> sqlx::Result<Account> {
    sqlx::query_as::<_, Account>(
        r"
        INSERT INTO users (username, email)
        VALUES ($1, $2)
        RETURNING id, username, email, date_joined
        ",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_account", username = %username))
}

/// Delete the account row. Returns the number of rows removed (0 or 1).
pub async fn delete_account(conn: &mut PgConnection, user_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(db_error!("delete_account", user_id = user_id))?;

    Ok(result.rows_affected())
}

// ============================================================================
// Dependent Record Queries
// ============================================================================

/// Get the storage key of the account's avatar, if it has one.
pub async fn find_profile_avatar(
    conn: &mut PgConnection,
    user_id: i64,
) -> sqlx::Result<Option<String>> {
    let avatar: Option<Option<String>> =
        sqlx::query_scalar("SELECT avatar_key FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(conn)
            .await
            .map_err(db_error!("find_profile_avatar", user_id = user_id))?;

    Ok(avatar.flatten().filter(|key| !key.is_empty()))
}

/// Delete the account's profile.
pub async fn delete_user_profile(conn: &mut PgConnection, user_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(db_error!("delete_user_profile", user_id = user_id))?;

    Ok(result.rows_affected())
}

/// Delete the account's education history.
pub async fn delete_user_education(conn: &mut PgConnection, user_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM user_education WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(db_error!("delete_user_education", user_id = user_id))?;

    Ok(result.rows_affected())
}

/// Delete the account's certifications.
pub async fn delete_user_certifications(
    conn: &mut PgConnection,
    user_id: i64,
) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM user_certifications WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(db_error!("delete_user_certifications", user_id = user_id))?;

    Ok(result.rows_affected())
}

/// Delete the account's achievements.
pub async fn delete_user_achievements(
    conn: &mut PgConnection,
    user_id: i64,
) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM user_achievements WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(db_error!("delete_user_achievements", user_id = user_id))?;

    Ok(result.rows_affected())
}
