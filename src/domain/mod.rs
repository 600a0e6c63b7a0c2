//! Domain layer: the marker entity and its ordering rules.

pub mod marker;

pub use marker::{Marker, NewMarker, format_timestamp, newest_first};
