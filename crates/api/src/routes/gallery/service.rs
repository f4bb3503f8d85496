use crate::routes::gallery::error::GalleryError;
use crate::routes::gallery::interfaces::{
    AlbumSummaryView, AlbumUpdate, AlbumView, CollectionScope, GeneralAlbumView, GeneralKind,
    MutationResult, PhotoUpdate, PhotoView,
};
use chrono::Utc;
use common_gallery::{Album, Photo, StorageSettings, User};
use sqlx::sqlite::Sqlite;
use sqlx::{FromRow, QueryBuilder, SqlitePool};

/// Row shape of the annotated album listing: the album plus its photo count
/// and the aggregated child photo ids.
#[derive(FromRow)]
struct AlbumSummaryRow {
    id: i64,
    title: String,
    public: bool,
    user_id: i64,
    photo_count: i64,
    photo_ids: Option<String>,
}

impl From<AlbumSummaryRow> for AlbumSummaryView {
    fn from(row: AlbumSummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            public: row.public,
            user_id: row.user_id,
            count: row.photo_count,
            source: preview_source(row.photo_ids.as_deref()),
        }
    }
}

/// Up to 3 most-recent photo ids out of the aggregated id list, as strings.
fn preview_source(photo_ids: Option<&str>) -> Vec<String> {
    let Some(photo_ids) = photo_ids else {
        return Vec::new();
    };
    let mut ids: Vec<i64> = photo_ids.split(',').filter_map(|v| v.parse().ok()).collect();
    ids.sort_unstable_by(|a, b| b.cmp(a));
    ids.truncate(3);
    ids.into_iter().map(|v| v.to_string()).collect()
}

/// Counts and capped id lists of the caller's virtual all/public/starred
/// groupings. The six queries run concurrently; the public/starred ones only
/// cover photos that are not in any album.
pub async fn general_album(
    pool: &SqlitePool,
    user: &User,
    limit: i64,
) -> Result<GeneralAlbumView, GalleryError> {
    let all_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photo WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(pool);
    let public_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM photo WHERE user_id = ? AND album_id IS NULL AND public = TRUE",
    )
    .bind(user.id)
    .fetch_one(pool);
    let starred_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM photo WHERE user_id = ? AND album_id IS NULL AND starred = TRUE",
    )
    .bind(user.id)
    .fetch_one(pool);

    let all_source = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM photo WHERE user_id = ? ORDER BY id DESC LIMIT ?",
    )
    .bind(user.id)
    .bind(limit)
    .fetch_all(pool);
    let public_source = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM photo WHERE user_id = ? AND album_id IS NULL AND public = TRUE \
         ORDER BY id DESC LIMIT ?",
    )
    .bind(user.id)
    .bind(limit)
    .fetch_all(pool);
    let starred_source = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM photo WHERE user_id = ? AND album_id IS NULL AND starred = TRUE \
         ORDER BY id DESC LIMIT ?",
    )
    .bind(user.id)
    .bind(limit)
    .fetch_all(pool);

    let (all_count, public_count, starred_count, all_source, public_source, starred_source) = tokio::try_join!(
        all_count,
        public_count,
        starred_count,
        all_source,
        public_source,
        starred_source,
    )?;

    Ok(GeneralAlbumView {
        all_count,
        public_count,
        starred_count,
        all_source,
        public_source,
        starred_source,
    })
}

const ALBUM_SUMMARY_COLUMNS: &str = "a.id, a.title, a.public, a.user_id, \
     COUNT(p.id) AS photo_count, GROUP_CONCAT(p.id) AS photo_ids";

/// List annotated albums: all public ones, or the caller's own. An anonymous
/// caller asking for own albums gets an empty list.
pub async fn list_albums(
    pool: &SqlitePool,
    viewer: Option<&User>,
    scope: Option<CollectionScope>,
) -> Result<Vec<AlbumSummaryView>, GalleryError> {
    let rows: Vec<AlbumSummaryRow> = if scope == Some(CollectionScope::Public) {
        sqlx::query_as(&format!(
            "SELECT {ALBUM_SUMMARY_COLUMNS} FROM album a \
             LEFT JOIN photo p ON p.album_id = a.id \
             WHERE a.public = TRUE GROUP BY a.id"
        ))
        .fetch_all(pool)
        .await?
    } else if let Some(user) = viewer {
        sqlx::query_as(&format!(
            "SELECT {ALBUM_SUMMARY_COLUMNS} FROM album a \
             LEFT JOIN photo p ON p.album_id = a.id \
             WHERE a.user_id = ? GROUP BY a.id"
        ))
        .bind(user.id)
        .fetch_all(pool)
        .await?
    } else {
        return Ok(Vec::new());
    };

    Ok(rows.into_iter().map(Into::into).collect())
}

/// The album with the given id when it is public or owned by the viewer.
pub async fn find_visible_album(
    pool: &SqlitePool,
    viewer: Option<&User>,
    album_id: i64,
) -> Result<Option<AlbumView>, GalleryError> {
    let mut sql = String::from(
        "SELECT id, title, public, user_id, created_at, updated_at FROM album \
         WHERE id = ? AND (public = TRUE",
    );
    if viewer.is_some() {
        sql.push_str(" OR user_id = ?");
    }
    sql.push(')');

    let mut query = sqlx::query_as::<_, Album>(&sql).bind(album_id);
    if let Some(user) = viewer {
        query = query.bind(user.id);
    }

    Ok(query.fetch_optional(pool).await?.map(Into::into))
}

/// List photos, newest first. `PUBLIC` scope covers photos that are public
/// themselves or sit in a public album, filtered to the album context;
/// otherwise the result is scoped to the authenticated caller's own photos,
/// either of one album or of a virtual grouping.
pub async fn list_photos(
    pool: &SqlitePool,
    viewer: Option<&User>,
    scope: Option<CollectionScope>,
    limit: Option<i64>,
    album_id: Option<i64>,
    general: Option<GeneralKind>,
) -> Result<Vec<PhotoView>, GalleryError> {
    // In SQLite a negative LIMIT means "no limit".
    let limit = limit.unwrap_or(-1);

    let rows: Vec<Photo> = if scope == Some(CollectionScope::Public) {
        if let Some(album_id) = album_id {
            sqlx::query_as(
                "SELECT p.* FROM photo p LEFT JOIN album a ON a.id = p.album_id \
                 WHERE (p.public = TRUE OR a.public = TRUE) AND p.album_id = ? \
                 ORDER BY p.id DESC LIMIT ?",
            )
            .bind(album_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as(
                "SELECT p.* FROM photo p LEFT JOIN album a ON a.id = p.album_id \
                 WHERE (p.public = TRUE OR a.public = TRUE) AND p.album_id IS NULL \
                 ORDER BY p.id DESC LIMIT ?",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    } else if let Some(user) = viewer {
        if let Some(album_id) = album_id {
            sqlx::query_as(
                "SELECT * FROM photo WHERE user_id = ? AND album_id = ? \
                 ORDER BY id DESC LIMIT ?",
            )
            .bind(user.id)
            .bind(album_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        } else if let Some(general) = general {
            let sql = match general {
                GeneralKind::Unsorted => {
                    "SELECT * FROM photo WHERE user_id = ? ORDER BY id DESC LIMIT ?"
                }
                GeneralKind::Public => {
                    "SELECT * FROM photo WHERE user_id = ? AND public = TRUE \
                     ORDER BY id DESC LIMIT ?"
                }
                GeneralKind::Starred => {
                    "SELECT * FROM photo WHERE user_id = ? AND starred = TRUE \
                     ORDER BY id DESC LIMIT ?"
                }
                GeneralKind::Recent => {
                    "SELECT * FROM photo WHERE user_id = ? ORDER BY updated_at DESC LIMIT ?"
                }
                GeneralKind::Unknown => return Ok(Vec::new()),
            };
            sqlx::query_as(sql)
                .bind(user.id)
                .bind(limit)
                .fetch_all(pool)
                .await?
        } else {
            return Ok(Vec::new());
        }
    } else {
        return Ok(Vec::new());
    };

    Ok(rows.into_iter().map(Into::into).collect())
}

/// The photo with the given id when it is public, sits in a public album, or
/// is owned by the viewer.
pub async fn find_visible_photo(
    pool: &SqlitePool,
    viewer: Option<&User>,
    photo_id: i64,
) -> Result<Option<Photo>, sqlx::Error> {
    let mut sql = String::from(
        "SELECT p.* FROM photo p LEFT JOIN album a ON a.id = p.album_id \
         WHERE p.id = ? AND (p.public = TRUE OR a.public = TRUE",
    );
    if viewer.is_some() {
        sql.push_str(" OR p.user_id = ?");
    }
    sql.push(')');

    let mut query = sqlx::query_as::<_, Photo>(&sql).bind(photo_id);
    if let Some(user) = viewer {
        query = query.bind(user.id);
    }

    query.fetch_optional(pool).await
}

pub async fn get_photo(
    pool: &SqlitePool,
    viewer: Option<&User>,
    photo_id: i64,
) -> Result<Option<PhotoView>, GalleryError> {
    Ok(find_visible_photo(pool, viewer, photo_id)
        .await?
        .map(Into::into))
}

pub async fn create_album(
    pool: &SqlitePool,
    user: &User,
    title: Option<String>,
    public: bool,
) -> Result<AlbumSummaryView, GalleryError> {
    let now = Utc::now();
    let album = sqlx::query_as::<_, Album>(
        "INSERT INTO album (title, public, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(title.unwrap_or_else(|| "Untitled".to_string()))
    .bind(public)
    .bind(user.id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(AlbumSummaryView {
        id: album.id,
        title: album.title,
        public: album.public,
        user_id: album.user_id,
        count: 0,
        source: Vec::new(),
    })
}

/// Apply the supplied fields to an owned album. Succeeds iff exactly one row
/// was affected; a foreign or unknown album yields `success = false`.
pub async fn change_album(
    pool: &SqlitePool,
    user: &User,
    album_id: i64,
    update: AlbumUpdate,
) -> Result<MutationResult, GalleryError> {
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE album SET updated_at = ");
    builder.push_bind(Utc::now());
    if let Some(title) = update.title {
        builder.push(", title = ").push_bind(title);
    }
    if let Some(public) = update.public {
        builder.push(", public = ").push_bind(public);
    }
    builder.push(" WHERE id = ").push_bind(album_id);
    builder.push(" AND user_id = ").push_bind(user.id);

    let result = builder.build().execute(pool).await?;
    Ok(MutationResult {
        success: result.rows_affected() == 1,
    })
}

/// Detach the caller's photos from the album, then delete the album if the
/// caller owns it. Detached photos survive with no album reference.
pub async fn remove_album(
    pool: &SqlitePool,
    user: &User,
    album_id: i64,
) -> Result<MutationResult, GalleryError> {
    sqlx::query("UPDATE photo SET album_id = NULL, updated_at = ? WHERE album_id = ? AND user_id = ?")
        .bind(Utc::now())
        .bind(album_id)
        .bind(user.id)
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM album WHERE id = ? AND user_id = ?")
        .bind(album_id)
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(MutationResult {
        success: result.rows_affected() == 1,
    })
}

/// Apply the supplied fields to an owned photo. An `album_id` of -1 detaches
/// the photo from its album.
pub async fn change_photo(
    pool: &SqlitePool,
    user: &User,
    photo_id: i64,
    update: PhotoUpdate,
) -> Result<MutationResult, GalleryError> {
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE photo SET updated_at = ");
    builder.push_bind(Utc::now());
    if let Some(title) = update.title {
        builder.push(", title = ").push_bind(title);
    }
    if let Some(date) = update.date {
        builder.push(", date = ").push_bind(date);
    }
    if let Some(public) = update.public {
        builder.push(", public = ").push_bind(public);
    }
    if let Some(starred) = update.starred {
        builder.push(", starred = ").push_bind(starred);
    }
    match update.album_id {
        Some(-1) => {
            builder.push(", album_id = NULL");
        }
        Some(album_id) => {
            builder.push(", album_id = ").push_bind(album_id);
        }
        None => {}
    }
    builder.push(" WHERE id = ").push_bind(photo_id);
    builder.push(" AND user_id = ").push_bind(user.id);

    let result = builder.build().execute(pool).await?;
    Ok(MutationResult {
        success: result.rows_affected() == 1,
    })
}

/// Delete an owned photo: first its stored original and thumbnail, then the
/// row. A photo that is absent or not owned yields `success = false` without
/// touching the disk; a missing stored file is an explicit error.
pub async fn remove_photo(
    pool: &SqlitePool,
    storage: &StorageSettings,
    user: &User,
    photo_id: i64,
) -> Result<MutationResult, GalleryError> {
    let photo: Option<Photo> = sqlx::query_as("SELECT * FROM photo WHERE id = ? AND user_id = ?")
        .bind(photo_id)
        .bind(user.id)
        .fetch_optional(pool)
        .await?;
    let Some(photo) = photo else {
        return Ok(MutationResult { success: false });
    };

    tokio::fs::remove_file(storage.photo_original_path(&photo)).await?;
    tokio::fs::remove_file(storage.thumbnail_path(&photo.file_id)).await?;

    let result = sqlx::query("DELETE FROM photo WHERE id = ? AND user_id = ?")
        .bind(photo_id)
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(MutationResult {
        success: result.rows_affected() == 1,
    })
}
