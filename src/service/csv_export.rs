//! CSV rendering for the marker export endpoint.

use crate::domain::Marker;
use crate::error::GatewayError;

/// Header row of the export.
pub const HEADER: [&str; 5] = ["id", "lat", "lng", "comment", "created_at"];

/// Renders markers as CSV with a header row and CRLF line endings.
///
/// Missing values become empty fields. Fields are quoted only when they
/// contain a delimiter, quote or line break.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if the document cannot be written.
pub fn render(markers: &[Marker]) -> Result<String, GatewayError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(HEADER).map_err(csv_error)?;
    for marker in markers {
        writer
            .write_record([
                marker.id.to_string(),
                format_coordinate(marker.lat),
                format_coordinate(marker.lng),
                marker.comment.clone().unwrap_or_default(),
                marker.created_at_iso().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GatewayError::Internal(format!("csv flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| GatewayError::Internal(e.to_string()))
}

/// Coordinates always keep a decimal point (`1.0`, not `1`).
fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{v:?}")).unwrap_or_default()
}

fn csv_error(err: csv::Error) -> GatewayError {
    GatewayError::Internal(format!("csv write failed: {err}"))
}
