//! Marker request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Marker, NewMarker};

/// Request body for `POST /markers`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMarkerRequest {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Free-form comment, may be empty.
    pub comment: String,
}

impl From<CreateMarkerRequest> for NewMarker {
    fn from(req: CreateMarkerRequest) -> Self {
        Self::new(req.lat, req.lng, req.comment)
    }
}

/// A marker as returned by `GET /markers`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkerDto {
    /// Marker ID.
    pub id: i64,
    /// Latitude.
    pub lat: Option<f64>,
    /// Longitude.
    pub lng: Option<f64>,
    /// Comment.
    pub comment: Option<String>,
    /// ISO-8601 creation timestamp.
    pub created_at: Option<String>,
}

impl From<Marker> for MarkerDto {
    fn from(marker: Marker) -> Self {
        let created_at = marker.created_at_iso();
        Self {
            id: marker.id,
            lat: marker.lat,
            lng: marker.lng,
            comment: marker.comment,
            created_at,
        }
    }
}

/// `{status}` acknowledgement, with the marker ID on single deletes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `"saved"`, `"cleared"` or `"deleted"`.
    pub status: String,
    /// ID of the deleted marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl StatusResponse {
    /// Acknowledgement without an ID.
    #[must_use]
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            id: None,
        }
    }

    /// Acknowledgement for a single marker.
    #[must_use]
    pub fn with_id(status: &str, id: i64) -> Self {
        Self {
            status: status.to_string(),
            id: Some(id),
        }
    }
}
