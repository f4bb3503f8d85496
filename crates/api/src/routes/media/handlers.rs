use crate::api_state::ApiContext;
use crate::routes::auth::MaybeUser;
use crate::routes::media::error::MediaError;
use crate::routes::media::interfaces::MediaQuery;
use crate::routes::media::service::serve_media_file;
use axum::extract::{Query, Request, State};
use axum::response::Response;

/// Stream a photo's original or thumbnail bytes.
#[utoipa::path(
    get,
    path = "/photo",
    params(MediaQuery),
    responses(
        (status = 200, description = "Media bytes.", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 206, description = "Requested byte range."),
        (status = 400, description = "No photo id supplied."),
        (status = 404, description = "Photo absent or not visible to the caller."),
    )
)]
pub async fn get_photo_file(
    State(context): State<ApiContext>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<MediaQuery>,
    request: Request,
) -> Result<Response, MediaError> {
    serve_media_file(
        &context.pool,
        &context.settings.storage,
        viewer.as_ref(),
        &query,
        request,
    )
    .await
}
