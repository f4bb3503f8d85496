use crate::api_state::ApiContext;
use crate::create_router;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use common_gallery::{get_db_pool, load_app_settings};
use http::HeaderValue;
use std::net::SocketAddr;
use tokio::fs;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub async fn serve() -> Result<()> {
    info!("Initializing server...");
    let settings = load_app_settings()?;
    let pool = get_db_pool(&settings.database).await?;

    fs::create_dir_all(settings.storage.originals_dir()).await?;
    fs::create_dir_all(settings.storage.thumbnails_dir()).await?;

    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers(cors::Any);

    let context = ApiContext {
        pool,
        settings: settings.clone(),
    };

    let app = create_router(context)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
