//! Error types for the client library

mod api_error;

pub use api_error::{ApiError, ApiResult};
