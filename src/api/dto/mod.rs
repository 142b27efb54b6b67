//! API DTOs

pub mod common;
pub mod validated_json;

pub use common::{ApiResponse, EmptyData, PaginatedResponse, PaginationParams};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
