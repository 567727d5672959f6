//! Data Transfer Objects for REST request/response serialization.

pub mod record_dto;

pub use crate::error::MessageResponse;
pub use record_dto::StoreDataRequest;
