use chrono::Utc;
use common_gallery::{new_file_id, Album, Photo, StorageSettings, User, MIGRATOR};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// A migrated in-memory database. One connection only: every connection of
/// a `sqlite::memory:` pool would otherwise see its own empty database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory database");
    MIGRATOR.run(&pool).await.expect("run migrations");
    pool
}

/// Storage settings rooted in a fresh temp dir with both areas created.
pub fn temp_storage() -> (TempDir, StorageSettings) {
    let dir = TempDir::new().expect("create temp dir");
    let storage = StorageSettings {
        upload_folder: dir.path().to_path_buf(),
    };
    std::fs::create_dir_all(storage.originals_dir()).expect("create originals dir");
    std::fs::create_dir_all(storage.thumbnails_dir()).expect("create thumbnails dir");
    (dir, storage)
}

pub async fn register(pool: &SqlitePool, username: &str) -> User {
    let now = Utc::now();
    sqlx::query_as::<_, User>(
        "INSERT INTO app_user (username, password, created_at, updated_at) \
         VALUES (?, ?, ?, ?) RETURNING id, username, created_at, updated_at",
    )
    .bind(username)
    .bind("$argon2id$test-hash")
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("insert user")
}

pub async fn insert_album(pool: &SqlitePool, user_id: i64, title: &str, public: bool) -> Album {
    let now = Utc::now();
    sqlx::query_as::<_, Album>(
        "INSERT INTO album (title, public, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(title)
    .bind(public)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("insert album")
}

pub async fn insert_photo(
    pool: &SqlitePool,
    user_id: i64,
    album_id: Option<i64>,
    public: bool,
    starred: bool,
) -> Photo {
    let now = Utc::now();
    sqlx::query_as::<_, Photo>(
        "INSERT INTO photo \
         (file_id, date, original_name, mime, public, starred, album_id, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_file_id())
    .bind(now)
    .bind("test.jpg")
    .bind("image/jpeg")
    .bind(public)
    .bind(starred)
    .bind(album_id)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("insert photo")
}
