//! # accord-client
//!
//! Authenticated REST client. Every operation issues one HTTP round trip
//! through an [`HttpTransport`], maps the JSON response into an
//! `accord-core` entity, and binds the entity back to the client so lazy
//! relationships and entity actions can reach the server.

pub mod client;
pub mod logging;
pub mod transport;
pub mod url;

// Re-export commonly used types at crate root
pub use client::{Client, ClientBuilder, USER_AGENT};
pub use logging::{LogSink, TracingSink, LOG_TARGET};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use url::{api_base_url, DEFAULT_API_BASE_URL};

pub use accord_core::*;
