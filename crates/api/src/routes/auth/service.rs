use crate::routes::auth::error::AuthError;
use crate::routes::auth::hashing::{hash_password, verify_password};
use chrono::{Duration, Utc};
use common_gallery::{session_token, User, UserWithPassword};
use sqlx::SqlitePool;

/// Register a new user. An already-taken username is rejected.
pub async fn register_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM app_user WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if taken.is_some() {
        return Err(AuthError::UsernameTaken);
    }

    let hashed_password = hash_password(password.as_bytes())?;
    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO app_user (username, password, created_at, updated_at) \
         VALUES (?, ?, ?, ?) \
         RETURNING id, username, created_at, updated_at",
    )
    .bind(username)
    .bind(&hashed_password)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Verify a username/password pair against the stored hash.
pub async fn authenticate_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let record = sqlx::query_as::<_, UserWithPassword>(
        "SELECT id, username, password, created_at, updated_at FROM app_user WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password.as_bytes(), &record.password)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(User {
        id: record.id,
        username: record.username,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

/// Create a server-side session and return the opaque token for the cookie.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: i64,
    expiry_days: i64,
) -> Result<String, AuthError> {
    let token = session_token();
    let now = Utc::now();
    sqlx::query("INSERT INTO session (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(now)
        .bind(now + Duration::days(expiry_days))
        .execute(pool)
        .await?;
    Ok(token)
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM session WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolve a session token to its user. Unknown and expired tokens both
/// resolve to `None`.
pub async fn session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT u.id, u.username, u.created_at, u.updated_at \
         FROM session s \
         JOIN app_user u ON u.id = s.user_id \
         WHERE s.token = ? AND s.expires_at > ?",
    )
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::memory_pool;

    #[tokio::test]
    async fn register_hashes_the_password() {
        let pool = memory_pool().await;
        register_user(&pool, "alice", "hunter2").await.expect("register");

        let stored: String = sqlx::query_scalar("SELECT password FROM app_user WHERE username = ?")
            .bind("alice")
            .fetch_one(&pool)
            .await
            .expect("fetch password");

        assert_ne!(stored, "hunter2");
        assert!(stored.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let pool = memory_pool().await;
        register_user(&pool, "alice", "hunter2").await.expect("register");

        let err = register_user(&pool, "alice", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn login_roundtrip_and_wrong_password() {
        let pool = memory_pool().await;
        let registered = register_user(&pool, "alice", "hunter2").await.expect("register");

        let user = authenticate_user(&pool, "alice", "hunter2").await.expect("login");
        assert_eq!(user.id, registered.id);

        let err = authenticate_user(&pool, "alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = authenticate_user(&pool, "nobody", "hunter2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn session_roundtrip_logout_and_expiry() {
        let pool = memory_pool().await;
        let user = register_user(&pool, "alice", "hunter2").await.expect("register");

        let token = create_session(&pool, user.id, 30).await.expect("session");
        let resolved = session_user(&pool, &token).await.expect("lookup");
        assert_eq!(resolved.map(|u| u.id), Some(user.id));

        delete_session(&pool, &token).await.expect("logout");
        assert!(session_user(&pool, &token).await.expect("lookup").is_none());

        // An expired session no longer resolves.
        let expired = create_session(&pool, user.id, -1).await.expect("session");
        assert!(session_user(&pool, &expired).await.expect("lookup").is_none());
    }
}
