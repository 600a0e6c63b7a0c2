//! Data Transfer Objects for REST request/response serialization.

pub mod access_dto;
pub mod marker_dto;

pub use access_dto::*;
pub use marker_dto::*;
