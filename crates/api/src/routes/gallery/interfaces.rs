use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use common_gallery::{Album, Photo};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One query or mutation document posted to the `/api` endpoint. The
/// `operation` tag selects the operation; the remaining fields are its
/// arguments. Timestamps cross the wire as integer milliseconds since epoch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum GalleryRequest {
    /// Counts and id previews of the caller's virtual all/public/starred
    /// groupings.
    #[serde(rename_all = "camelCase")]
    GeneralAlbum { limit: i64 },

    /// List public albums, or the caller's own when `type` is not `PUBLIC`.
    #[serde(rename_all = "camelCase")]
    Albums {
        #[serde(rename = "type", default)]
        scope: Option<CollectionScope>,
    },

    /// A single album, subject to the visibility rule.
    #[serde(rename_all = "camelCase")]
    Album { album_id: i64 },

    /// List photos: public ones, an owned album's, or an owned virtual
    /// grouping.
    #[serde(rename_all = "camelCase")]
    Photos {
        #[serde(rename = "type", default)]
        scope: Option<CollectionScope>,
        #[serde(default)]
        limit: Option<i64>,
        #[serde(default)]
        album_id: Option<i64>,
        #[serde(default)]
        general: Option<GeneralKind>,
    },

    /// A single photo, subject to the visibility rule.
    #[serde(rename_all = "camelCase")]
    Photo { photo_id: i64 },

    #[serde(rename_all = "camelCase")]
    CreateAlbum {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        public: bool,
    },

    /// Update the supplied fields of an owned album.
    #[serde(rename_all = "camelCase")]
    ChangeAlbum {
        album_id: i64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        public: Option<bool>,
    },

    #[serde(rename_all = "camelCase")]
    RemoveAlbum { album_id: i64 },

    /// Update the supplied fields of an owned photo. An `albumId` of -1
    /// detaches the photo from its album.
    #[serde(rename_all = "camelCase")]
    ChangePhoto {
        photo_id: i64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default, with = "ts_milliseconds_option")]
        #[schema(value_type = Option<i64>)]
        date: Option<DateTime<Utc>>,
        #[serde(default)]
        public: Option<bool>,
        #[serde(default)]
        starred: Option<bool>,
        #[serde(default)]
        album_id: Option<i64>,
    },

    #[serde(rename_all = "camelCase")]
    RemovePhoto { photo_id: i64 },
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionScope {
    Public,
    Own,
}

/// Virtual groupings over a user's own photos. Unknown values deserialize to
/// `Unknown` and yield an empty result instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum GeneralKind {
    Unsorted,
    Public,
    Starred,
    Recent,
    Unknown,
}

impl<'de> Deserialize<'de> for GeneralKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "Unsorted" => Self::Unsorted,
            "Public" => Self::Public,
            "Starred" => Self::Starred,
            "Recent" => Self::Recent,
            _ => Self::Unknown,
        })
    }
}

/// Explicit optional-field update for `changeAlbum`: only supplied fields
/// are applied.
#[derive(Debug, Default, Clone)]
pub struct AlbumUpdate {
    pub title: Option<String>,
    pub public: Option<bool>,
}

/// Explicit optional-field update for `changePhoto`.
#[derive(Debug, Default, Clone)]
pub struct PhotoUpdate {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub public: Option<bool>,
    pub starred: Option<bool>,
    /// -1 detaches the photo from its album.
    pub album_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum GalleryResponse {
    GeneralAlbum(GeneralAlbumView),
    Albums(Vec<AlbumSummaryView>),
    Album(Option<AlbumView>),
    Photos(Vec<PhotoView>),
    Photo(Option<PhotoView>),
    CreatedAlbum(AlbumSummaryView),
    Mutation(MutationResult),
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub id: i64,
    pub file_id: String,
    pub title: String,
    #[serde(with = "ts_milliseconds")]
    #[schema(value_type = i64)]
    pub date: DateTime<Utc>,
    /// When the photo entered the library.
    #[serde(with = "ts_milliseconds")]
    #[schema(value_type = i64)]
    pub uploaded: DateTime<Utc>,
    pub original_name: String,
    pub mime: String,
    pub public: bool,
    pub starred: bool,
    pub size: i64,
    pub resolution: String,
    pub album_id: Option<i64>,
    pub user_id: i64,
}

impl From<Photo> for PhotoView {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            file_id: photo.file_id,
            title: photo.title,
            date: photo.date,
            uploaded: photo.created_at,
            original_name: photo.original_name,
            mime: photo.mime,
            public: photo.public,
            starred: photo.starred,
            size: photo.size,
            resolution: photo.resolution,
            album_id: photo.album_id,
            user_id: photo.user_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub id: i64,
    pub title: String,
    pub public: bool,
    pub user_id: i64,
}

impl From<Album> for AlbumView {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            title: album.title,
            public: album.public,
            user_id: album.user_id,
        }
    }
}

/// An album annotated with its photo count and a preview of up to 3 most
/// recent photo ids (as strings).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummaryView {
    pub id: i64,
    pub title: String,
    pub public: bool,
    pub user_id: i64,
    pub count: i64,
    pub source: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneralAlbumView {
    pub all_count: i64,
    pub public_count: i64,
    pub starred_count: i64,
    pub all_source: Vec<i64>,
    pub public_source: Vec<i64>,
    pub starred_source: Vec<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResult {
    pub success: bool,
}
