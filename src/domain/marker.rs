//! The marker entity and its ordering and formatting rules.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};

/// A stored map marker.
///
/// Every column except `id` is nullable in tables created by older
/// releases, so the optional fields are carried as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Storage-assigned identifier, never reused.
    pub id: i64,
    /// Latitude, unconstrained.
    pub lat: Option<f64>,
    /// Longitude, unconstrained.
    pub lng: Option<f64>,
    /// Free-form comment.
    pub comment: Option<String>,
    /// Insertion time.
    pub created_at: Option<DateTime<Utc>>,
}

impl Marker {
    /// `created_at` rendered as an ISO-8601 string, if present.
    #[must_use]
    pub fn created_at_iso(&self) -> Option<String> {
        self.created_at.as_ref().map(format_timestamp)
    }
}

/// A marker about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarker {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Free-form comment, may be empty.
    pub comment: String,
    /// Explicit insertion time; the store uses the current time when `None`.
    ///
    /// The HTTP API never sets this. It exists for seeding stores with
    /// fixed timestamps, e.g. to exercise the ordering tie-break.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMarker {
    /// Creates a marker stamped with the insertion time.
    #[must_use]
    pub fn new(lat: f64, lng: f64, comment: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            comment: comment.into(),
            created_at: None,
        }
    }

    /// Overrides the insertion time. Used for seeding and ordering tests;
    /// request handlers always leave the time to the store.
    #[must_use]
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Listing order: `created_at` descending with missing timestamps first,
/// then `id` descending.
#[must_use]
pub fn newest_first(a: &Marker, b: &Marker) -> Ordering {
    let by_time = match (a.created_at, b.created_at) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x),
    };
    by_time.then_with(|| b.id.cmp(&a.id))
}

/// Formats a timestamp as RFC 3339 with a numeric offset. Fractional
/// seconds are printed in microseconds and dropped when zero.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let precision = if ts.timestamp_subsec_nanos() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(precision, false)
}
