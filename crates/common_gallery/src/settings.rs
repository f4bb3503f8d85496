use crate::Photo;
use color_eyre::Result;
use serde::Deserialize;
use std::path::{absolute, Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Folder holding the `original/` and `thumbnail/` storage areas.
    pub upload_folder: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub session_cookie: String,
    pub session_expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl StorageSettings {
    #[must_use]
    pub fn originals_dir(&self) -> PathBuf {
        self.upload_folder.join("original")
    }

    #[must_use]
    pub fn thumbnails_dir(&self) -> PathBuf {
        self.upload_folder.join("thumbnail")
    }

    /// Path of a stored original: `<upload>/original/<file_id>.<ext>`, with
    /// the extension carried over from the client-supplied filename.
    #[must_use]
    pub fn original_path(&self, file_id: &str, original_name: &str) -> PathBuf {
        let file_name = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{file_id}.{ext}"),
            None => file_id.to_string(),
        };
        self.originals_dir().join(file_name)
    }

    #[must_use]
    pub fn photo_original_path(&self, photo: &Photo) -> PathBuf {
        self.original_path(&photo.file_id, &photo.original_name)
    }

    /// Thumbnails are always stored as `<upload>/thumbnail/<file_id>.png`.
    #[must_use]
    pub fn thumbnail_path(&self, file_id: &str) -> PathBuf {
        self.thumbnails_dir().join(format!("{file_id}.png"))
    }
}

/// Load settings from `config/settings.yaml`, with `APP__`-prefixed
/// environment variables taking precedence over the file.
pub fn load_app_settings() -> Result<AppSettings> {
    // Load .env first so it can overwrite the database url from env.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml");

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let mut settings = builder.build()?.try_deserialize::<AppSettings>()?;
    settings.storage.upload_folder = absolute(&settings.storage.upload_folder)?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(folder: &str) -> StorageSettings {
        StorageSettings {
            upload_folder: PathBuf::from(folder),
        }
    }

    #[test]
    fn original_path_keeps_client_extension() {
        let storage = storage("/tmp/uploads");
        let path = storage.original_path("abc-123", "holiday photo.JPG");
        assert_eq!(path, PathBuf::from("/tmp/uploads/original/abc-123.JPG"));
    }

    #[test]
    fn original_path_without_extension_uses_bare_file_id() {
        let storage = storage("/tmp/uploads");
        let path = storage.original_path("abc-123", "noext");
        assert_eq!(path, PathBuf::from("/tmp/uploads/original/abc-123"));
    }

    #[test]
    fn thumbnail_path_is_always_png() {
        let storage = storage("/tmp/uploads");
        let path = storage.thumbnail_path("abc-123");
        assert_eq!(path, PathBuf::from("/tmp/uploads/thumbnail/abc-123.png"));
    }
}
