pub mod auth;
pub mod gallery;
pub mod media;
pub mod root;
pub mod upload;

use crate::api_state::ApiContext;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Uploads carry full-size originals; the default body limit is far too
/// small for them.
const UPLOAD_BODY_LIMIT: usize = 512 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::me,
        gallery::handlers::run_gallery_operation,
        upload::handlers::upload,
        media::handlers::get_photo_file,
    ),
    components(
        schemas(
            common_gallery::User,
            auth::interfaces::LoginRequest,
            gallery::interfaces::GalleryRequest,
            gallery::interfaces::GalleryResponse,
            gallery::interfaces::CollectionScope,
            gallery::interfaces::GeneralKind,
            gallery::interfaces::PhotoView,
            gallery::interfaces::AlbumView,
            gallery::interfaces::AlbumSummaryView,
            gallery::interfaces::GeneralAlbumView,
            gallery::interfaces::MutationResult,
            media::interfaces::MediaVariant,
        ),
    ),
    tags(
        (name = "Gallery", description = "Personal photo gallery API")
    )
)]
struct ApiDoc;

pub fn create_router(context: ApiContext) -> Router {
    Router::new()
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/", get(root::handlers::root))
        .route("/health", get(root::handlers::health_check))
        .route("/auth/local", post(auth::handlers::login))
        .route("/auth/logout", get(auth::handlers::logout))
        .route("/auth/me", get(auth::handlers::me))
        .route("/api", post(gallery::handlers::run_gallery_operation))
        .route(
            "/upload",
            post(upload::handlers::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/photo", get(media::handlers::get_photo_file))
        .with_state(context)
}
