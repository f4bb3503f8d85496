use crate::api_state::ApiContext;
use crate::routes::auth::MaybeUser;
use crate::routes::gallery::error::GalleryError;
use crate::routes::gallery::interfaces::{
    AlbumUpdate, GalleryRequest, GalleryResponse, PhotoUpdate,
};
use crate::routes::gallery::service;
use axum::extract::State;
use axum::Json;
use common_gallery::User;

/// Run one gallery query or mutation document.
///
/// Queries are visibility-scoped and open to anonymous callers; mutations
/// require a session and are scoped to rows the caller owns.
#[utoipa::path(
    post,
    path = "/api",
    request_body = GalleryRequest,
    responses(
        (status = 200, description = "Operation result.", body = GalleryResponse),
        (status = 401, description = "Mutation attempted without a session."),
    )
)]
pub async fn run_gallery_operation(
    State(context): State<ApiContext>,
    MaybeUser(viewer): MaybeUser,
    Json(request): Json<GalleryRequest>,
) -> Result<Json<GalleryResponse>, GalleryError> {
    let pool = &context.pool;
    let viewer = viewer.as_ref();

    // Mutations fail fast when there is no session.
    fn acting_user(viewer: Option<&User>) -> Result<&User, GalleryError> {
        viewer.ok_or(GalleryError::Unauthorized)
    }

    let response = match request {
        GalleryRequest::GeneralAlbum { limit } => {
            let user = acting_user(viewer)?;
            GalleryResponse::GeneralAlbum(service::general_album(pool, user, limit).await?)
        }
        GalleryRequest::Albums { scope } => {
            GalleryResponse::Albums(service::list_albums(pool, viewer, scope).await?)
        }
        GalleryRequest::Album { album_id } => {
            GalleryResponse::Album(service::find_visible_album(pool, viewer, album_id).await?)
        }
        GalleryRequest::Photos {
            scope,
            limit,
            album_id,
            general,
        } => GalleryResponse::Photos(
            service::list_photos(pool, viewer, scope, limit, album_id, general).await?,
        ),
        GalleryRequest::Photo { photo_id } => {
            GalleryResponse::Photo(service::get_photo(pool, viewer, photo_id).await?)
        }
        GalleryRequest::CreateAlbum { title, public } => {
            let user = acting_user(viewer)?;
            GalleryResponse::CreatedAlbum(service::create_album(pool, user, title, public).await?)
        }
        GalleryRequest::ChangeAlbum {
            album_id,
            title,
            public,
        } => {
            let user = acting_user(viewer)?;
            GalleryResponse::Mutation(
                service::change_album(pool, user, album_id, AlbumUpdate { title, public }).await?,
            )
        }
        GalleryRequest::RemoveAlbum { album_id } => {
            let user = acting_user(viewer)?;
            GalleryResponse::Mutation(service::remove_album(pool, user, album_id).await?)
        }
        GalleryRequest::ChangePhoto {
            photo_id,
            title,
            date,
            public,
            starred,
            album_id,
        } => {
            let user = acting_user(viewer)?;
            GalleryResponse::Mutation(
                service::change_photo(
                    pool,
                    user,
                    photo_id,
                    PhotoUpdate {
                        title,
                        date,
                        public,
                        starred,
                        album_id,
                    },
                )
                .await?,
            )
        }
        GalleryRequest::RemovePhoto { photo_id } => {
            let user = acting_user(viewer)?;
            GalleryResponse::Mutation(
                service::remove_photo(pool, &context.settings.storage, user, photo_id).await?,
            )
        }
    };

    Ok(Json(response))
}
