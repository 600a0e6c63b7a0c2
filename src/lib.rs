//! # marker-gateway
//!
//! REST API for storing, listing, deleting and exporting map markers
//! (latitude, longitude, comment), plus two configuration-backed
//! endpoints: maps API key retrieval and a shared-password check.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── MarkerService, AccessService (service/)
//!     │
//!     └── MarkerStore (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
