//! Data Transfer Objects for REST request/response serialization.

pub mod message_dto;
pub mod system_dto;

pub use message_dto::*;
pub use system_dto::*;
