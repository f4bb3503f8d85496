use crate::api_state::ApiContext;
use crate::routes::auth::CurrentUser;
use crate::routes::upload::error::UploadError;
use crate::routes::upload::service::{enrich_upload, parse_date_list, store_upload};
use axum::extract::{Multipart, State};
use common_gallery::Photo;
use tokio::task::JoinSet;
use tracing::info;

/// Ingest uploaded media files.
///
/// The multipart body carries repeated `photos` file parts and one `date`
/// part with comma-separated capture timestamps (milliseconds), one per file
/// by position. Files are stored first; metadata probing and thumbnail
/// generation then run concurrently per file, and the request only completes
/// once every file has finished. A file with a non-positive date is stored
/// but left unenriched; any processing failure fails the whole request.
#[utoipa::path(
    post,
    path = "/upload",
    responses(
        (status = 200, description = "All files ingested."),
        (status = 400, description = "Malformed multipart body or missing date list."),
        (status = 401, description = "Not logged in."),
        (status = 500, description = "A file failed to probe or transcode."),
    )
)]
pub async fn upload(
    State(context): State<ApiContext>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<&'static str, UploadError> {
    let mut stored: Vec<Photo> = Vec::new();
    let mut raw_dates: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("photos") => {
                let original_name = field.file_name().unwrap_or("upload").to_owned();
                let mime = match field.content_type() {
                    Some(mime) => mime.to_owned(),
                    None => mime_guess::from_path(&original_name)
                        .first_or_octet_stream()
                        .to_string(),
                };
                let bytes = field.bytes().await?;
                let photo = store_upload(
                    &context.pool,
                    &context.settings.storage,
                    user.id,
                    &original_name,
                    &mime,
                    &bytes,
                )
                .await?;
                stored.push(photo);
            }
            Some("date") => raw_dates = Some(field.text().await?),
            _ => {}
        }
    }

    let raw_dates = raw_dates.ok_or(UploadError::MissingDates)?;
    let dates = parse_date_list(&raw_dates);
    let file_count = stored.len();

    let mut tasks = JoinSet::new();
    for (i, photo) in stored.into_iter().enumerate() {
        let Some(date) = dates.get(i).copied().flatten() else {
            // Stored, but left in its placeholder state.
            continue;
        };
        let pool = context.pool.clone();
        let storage = context.settings.storage.clone();
        tasks.spawn(async move { enrich_upload(&pool, &storage, photo, date).await });
    }

    while let Some(result) = tasks.join_next().await {
        result??;
    }

    info!("Ingested {} uploaded file(s) for user {}", file_count, user.id);
    Ok("OK")
}
