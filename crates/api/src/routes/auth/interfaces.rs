use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Register the user first when the username is not taken yet.
    #[serde(default)]
    pub create: bool,
}
