//! Maps-key and password-check bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /maps-key`.
///
/// Both shapes are returned with status 200.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MapsKeyResponse {
    /// A key is configured.
    Configured {
        /// The maps API key.
        #[serde(rename = "apiKey")]
        api_key: String,
    },
    /// No key is configured.
    Missing {
        /// Explanation of the missing key.
        error: String,
    },
}

/// Request body for `POST /auth/check`.
///
/// A missing or null password is treated as the empty string.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PasswordCheckRequest {
    /// Password to check.
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful password check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PasswordCheckResponse {
    /// Always `true`.
    pub ok: bool,
}
