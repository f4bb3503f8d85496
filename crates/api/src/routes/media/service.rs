use crate::routes::gallery::service::find_visible_photo;
use crate::routes::media::error::MediaError;
use crate::routes::media::interfaces::{MediaQuery, MediaVariant};
use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use color_eyre::eyre;
use common_gallery::{StorageSettings, User};
use sqlx::SqlitePool;
use tower::util::ServiceExt;
use tower_http::services::ServeFile;

/// Stream a photo's original or thumbnail bytes, re-validating the same
/// visibility rule as the single-photo query. `ServeFile` handles range
/// requests and the content type.
pub async fn serve_media_file(
    pool: &SqlitePool,
    storage: &StorageSettings,
    viewer: Option<&User>,
    query: &MediaQuery,
    request: Request,
) -> Result<Response, MediaError> {
    let photo_id = query.id.ok_or(MediaError::MissingId)?;

    let photo = find_visible_photo(pool, viewer, photo_id)
        .await?
        .ok_or(MediaError::NotFound)?;

    let path = match query.variant {
        MediaVariant::Original => storage.photo_original_path(&photo),
        MediaVariant::Thumbnail => storage.thumbnail_path(&photo.file_id),
    };

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .map_err(|e| MediaError::Internal(eyre::Report::new(e)))?;

    Ok(response.map(Body::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{insert_photo, memory_pool, register, temp_storage};
    use axum::http::{header, StatusCode};

    fn media_request() -> Request {
        Request::builder()
            .uri("/photo")
            .body(Body::empty())
            .expect("request")
    }

    fn query(id: Option<i64>, variant: MediaVariant) -> MediaQuery {
        MediaQuery { id, variant }
    }

    #[tokio::test]
    async fn missing_id_is_a_bad_request() {
        let pool = memory_pool().await;
        let (_dir, storage) = temp_storage();

        let err = serve_media_file(
            &pool,
            &storage,
            None,
            &query(None, MediaVariant::Thumbnail),
            media_request(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::MissingId));
    }

    #[tokio::test]
    async fn unknown_or_invisible_photo_is_not_found() {
        let pool = memory_pool().await;
        let (_dir, storage) = temp_storage();
        let alice = register(&pool, "alice").await;
        let private = insert_photo(&pool, alice.id, None, false, false).await;

        let err = serve_media_file(
            &pool,
            &storage,
            None,
            &query(Some(999), MediaVariant::Thumbnail),
            media_request(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::NotFound));

        // A private photo is invisible to anonymous callers.
        let err = serve_media_file(
            &pool,
            &storage,
            None,
            &query(Some(private.id), MediaVariant::Thumbnail),
            media_request(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::NotFound));
    }

    #[tokio::test]
    async fn visible_photo_streams_with_range_support() {
        let pool = memory_pool().await;
        let (_dir, storage) = temp_storage();
        let alice = register(&pool, "alice").await;
        let photo = insert_photo(&pool, alice.id, None, true, false).await;

        std::fs::write(storage.thumbnail_path(&photo.file_id), b"0123456789")
            .expect("write thumbnail");

        let response = serve_media_file(
            &pool,
            &storage,
            None,
            &query(Some(photo.id), MediaVariant::Thumbnail),
            media_request(),
        )
        .await
        .expect("serve");
        assert_eq!(response.status(), StatusCode::OK);

        // Byte-range requests answer with partial content.
        let ranged = Request::builder()
            .uri("/photo")
            .header(header::RANGE, "bytes=0-3")
            .body(Body::empty())
            .expect("request");
        let response = serve_media_file(
            &pool,
            &storage,
            None,
            &query(Some(photo.id), MediaVariant::Thumbnail),
            ranged,
        )
        .await
        .expect("serve");
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_RANGE)
                .and_then(|v| v.to_str().ok()),
            Some("bytes 0-3/10")
        );
    }

    #[tokio::test]
    async fn owner_can_fetch_the_original_variant() {
        let pool = memory_pool().await;
        let (_dir, storage) = temp_storage();
        let alice = register(&pool, "alice").await;
        let photo = insert_photo(&pool, alice.id, None, false, false).await;

        std::fs::write(storage.photo_original_path(&photo), b"raw bytes").expect("write original");

        let response = serve_media_file(
            &pool,
            &storage,
            Some(&alice),
            &query(Some(photo.id), MediaVariant::Original),
            media_request(),
        )
        .await
        .expect("serve");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
