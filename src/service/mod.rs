//! Service layer: business logic orchestration.
//!
//! [`MarkerService`] wraps a [`crate::persistence::MarkerStore`] with the
//! marker endpoint semantics. [`AccessService`] answers the maps-key and
//! password-check endpoints from configuration.

pub mod access_service;
pub mod csv_export;
pub mod marker_service;

pub use access_service::AccessService;
pub use marker_service::MarkerService;
