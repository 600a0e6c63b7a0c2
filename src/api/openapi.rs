//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{
    CreateMarkerRequest, MapsKeyResponse, MarkerDto, PasswordCheckRequest, PasswordCheckResponse,
    StatusResponse,
};
use crate::api::handlers::{access, marker, system};
use crate::error::ErrorResponse;

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "marker-gateway", description = "Map marker storage and export API"),
    paths(
        marker::create_marker,
        marker::list_markers,
        marker::clear_markers,
        marker::export_markers,
        marker::delete_marker,
        access::maps_key,
        access::auth_check,
        system::health_handler,
    ),
    components(schemas(
        CreateMarkerRequest,
        MarkerDto,
        StatusResponse,
        MapsKeyResponse,
        PasswordCheckRequest,
        PasswordCheckResponse,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Markers", description = "Marker storage and export"),
        (name = "Access", description = "Maps key and shared-password check"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Swagger UI serving the generated document at `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}
