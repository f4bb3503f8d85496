use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct MediaQuery {
    /// The photo id. Required; its absence is a bad request.
    pub id: Option<i64>,
    /// Which stored variant to stream.
    #[serde(rename = "type", default)]
    pub variant: MediaVariant,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaVariant {
    Original,
    #[default]
    Thumbnail,
}
