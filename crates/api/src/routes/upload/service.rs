use crate::routes::upload::error::UploadError;
use chrono::{DateTime, Utc};
use common_gallery::{new_file_id, Photo, StorageSettings};
use generate_thumbnails::{generate_thumbnail, probe_media};
use sqlx::SqlitePool;
use tracing::debug;

/// Parse the comma-separated per-file capture dates (milliseconds since
/// epoch). Non-positive or unparsable entries mean "skip enrichment for this
/// file".
pub fn parse_date_list(raw: &str) -> Vec<Option<DateTime<Utc>>> {
    raw.split(',')
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .ok()
                .filter(|ms| *ms > 0)
                .and_then(DateTime::from_timestamp_millis)
        })
        .collect()
}

/// Store one received file: insert the photo row with placeholder metadata,
/// then write the bytes under the generated external id.
pub async fn store_upload(
    pool: &SqlitePool,
    storage: &StorageSettings,
    user_id: i64,
    original_name: &str,
    mime: &str,
    bytes: &[u8],
) -> Result<Photo, UploadError> {
    let file_id = new_file_id();
    let now = Utc::now();
    let photo = sqlx::query_as::<_, Photo>(
        "INSERT INTO photo (file_id, date, original_name, mime, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&file_id)
    .bind(now)
    .bind(original_name)
    .bind(mime)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tokio::fs::write(storage.original_path(&file_id, original_name), bytes).await?;
    debug!("Stored upload {} as {}", original_name, file_id);

    Ok(photo)
}

/// Enrich one stored file: probe for true resolution and size, update the
/// row, then derive the thumbnail. A malformed file aborts with an error.
pub async fn enrich_upload(
    pool: &SqlitePool,
    storage: &StorageSettings,
    photo: Photo,
    date: DateTime<Utc>,
) -> Result<(), UploadError> {
    let original = storage.photo_original_path(&photo);

    let probe = probe_media(&original).await?;
    sqlx::query(
        "UPDATE photo SET date = ?, resolution = ?, size = ?, updated_at = ? WHERE file_id = ?",
    )
    .bind(date)
    .bind(probe.resolution())
    .bind(probe.size)
    .bind(Utc::now())
    .bind(&photo.file_id)
    .execute(pool)
    .await?;

    let thumbnail = storage.thumbnail_path(&photo.file_id);
    let is_video = photo.mime.starts_with("video/");
    generate_thumbnail(&original, &thumbnail, is_video).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{memory_pool, register, temp_storage};

    #[test]
    fn date_list_skips_non_positive_and_garbage_entries() {
        let dates = parse_date_list("1700000000000,0,-5,abc,1700000001000");
        assert_eq!(dates.len(), 5);
        assert!(dates[0].is_some());
        assert!(dates[1].is_none());
        assert!(dates[2].is_none());
        assert!(dates[3].is_none());
        assert_eq!(dates[4].map(|d| d.timestamp_millis()), Some(1_700_000_001_000));
    }

    #[tokio::test]
    async fn store_upload_creates_placeholder_row_and_writes_bytes() {
        let pool = memory_pool().await;
        let (_dir, storage) = temp_storage();
        let alice = register(&pool, "alice").await;

        let photo = store_upload(
            &pool,
            &storage,
            alice.id,
            "beach day.jpg",
            "image/jpeg",
            b"not really a jpeg",
        )
        .await
        .expect("store");

        // Placeholder metadata until the pipeline enriches the row.
        assert_eq!(photo.title, "Untitled");
        assert_eq!(photo.resolution, "0 x 0");
        assert_eq!(photo.size, 0);
        assert_eq!(photo.album_id, None);
        assert!(!photo.public);
        assert_eq!(photo.original_name, "beach day.jpg");

        let stored = storage.original_path(&photo.file_id, &photo.original_name);
        let bytes = std::fs::read(stored).expect("stored file");
        assert_eq!(bytes, b"not really a jpeg");
    }

    #[tokio::test]
    async fn enrich_upload_fails_on_unreadable_media() {
        let pool = memory_pool().await;
        let (_dir, storage) = temp_storage();
        let alice = register(&pool, "alice").await;

        let photo = store_upload(&pool, &storage, alice.id, "broken.jpg", "image/jpeg", b"junk")
            .await
            .expect("store");

        // ffprobe cannot make sense of the bytes; the pipeline surfaces that.
        let result = enrich_upload(&pool, &storage, photo, Utc::now()).await;
        assert!(result.is_err());
    }
}
