use axum::extract::FromRef;
use common_gallery::{AppSettings, AuthSettings, StorageSettings};
use sqlx::SqlitePool;

/// Application context constructed once at startup and handed to every
/// handler as axum state.
#[derive(Clone)]
pub struct ApiContext {
    pub pool: SqlitePool,
    pub settings: AppSettings,
}

// These impls let extractors and handlers pull out just the part of the
// context they need.
impl FromRef<ApiContext> for SqlitePool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for StorageSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.storage.clone()
    }
}

impl FromRef<ApiContext> for AuthSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.auth.clone()
    }
}
