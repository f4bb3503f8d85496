use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a user in the application.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user record from the database, including the password hash.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Clone)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub public: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Clone)]
pub struct Photo {
    pub id: i64,
    /// External id used to name the stored files, decoupled from `id`.
    pub file_id: String,
    pub title: String,
    /// Capture date. Defaults to submission time until the ingest pipeline
    /// replaces it with the client-supplied one.
    pub date: DateTime<Utc>,
    pub original_name: String,
    pub mime: String,
    pub public: bool,
    pub starred: bool,
    pub size: i64,
    pub resolution: String,
    pub album_id: Option<i64>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

