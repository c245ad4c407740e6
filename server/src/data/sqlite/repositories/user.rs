//! User repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::UserRow;

type UserTuple = (i64, String, String, String, String, bool, i64);

const USER_COLUMNS: &str =
    "user_id, discord_id, username, display_name, auth_key, blacklisted, created_at";

fn map_user(row: UserTuple) -> UserRow {
    let (user_id, discord_id, username, display_name, auth_key, blacklisted, created_at) = row;
    UserRow {
        user_id,
        discord_id,
        username,
        display_name,
        auth_key,
        blacklisted,
        created_at,
    }
}

/// Create a new user. A duplicate discord_id surfaces as `Conflict`.
pub async fn create(
    pool: &SqlitePool,
    discord_id: &str,
    username: &str,
    display_name: &str,
    auth_key: &str,
) -> Result<UserRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO users (discord_id, username, display_name, auth_key, blacklisted, created_at) \
         VALUES (?, ?, ?, ?, 0, ?)",
    )
    .bind(discord_id)
    .bind(username)
    .bind(display_name)
    .bind(auth_key)
    .bind(now)
    .execute(pool)
    .await
    .map_err(SqliteError::from_query)?;

    Ok(UserRow {
        user_id: result.last_insert_rowid(),
        discord_id: discord_id.to_string(),
        username: username.to_string(),
        display_name: display_name.to_string(),
        auth_key: auth_key.to_string(),
        blacklisted: false,
        created_at: now,
    })
}

/// Get a user by Discord id
pub async fn by_discord_id(
    pool: &SqlitePool,
    discord_id: &str,
) -> Result<Option<UserRow>, SqliteError> {
    let row = sqlx::query_as::<_, UserTuple>(&format!(
        "SELECT {} FROM users WHERE discord_id = ?",
        USER_COLUMNS
    ))
    .bind(discord_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_user))
}

/// Get a user by internal id
pub async fn by_user_id(pool: &SqlitePool, user_id: i64) -> Result<Option<UserRow>, SqliteError> {
    let row = sqlx::query_as::<_, UserTuple>(&format!(
        "SELECT {} FROM users WHERE user_id = ?",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_user))
}

/// Get a user by auth key
pub async fn by_auth_key(pool: &SqlitePool, auth_key: &str) -> Result<Option<UserRow>, SqliteError> {
    let row = sqlx::query_as::<_, UserTuple>(&format!(
        "SELECT {} FROM users WHERE auth_key = ?",
        USER_COLUMNS
    ))
    .bind(auth_key)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_user))
}

/// Set or clear a user's blacklist flag. Returns false if the user is unknown.
pub async fn set_blacklisted(
    pool: &SqlitePool,
    user_id: i64,
    blacklisted: bool,
) -> Result<bool, SqliteError> {
    let result = sqlx::query("UPDATE users SET blacklisted = ? WHERE user_id = ?")
        .bind(blacklisted)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
