//! API errors - every failure a client call or entity action can produce

use thiserror::Error;

/// Result type for client and entity operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Client library errors
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request never produced a status (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// A response record was missing a required field or had the wrong shape
    #[error("Malformed {entity} response: {source}")]
    MalformedResponse {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// An entity needed the client but was built without one, or the client is gone
    #[error("No client bound to this entity")]
    NoClient,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Wrap a deserialization failure for the named entity
    pub fn malformed(entity: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedResponse { entity, source }
    }

    /// HTTP status carried by a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get an error code string for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { status, .. } => match status {
                400 => "BAD_REQUEST",
                401 => "UNAUTHORIZED",
                403 => "FORBIDDEN",
                404 => "NOT_FOUND",
                429 => "RATE_LIMITED",
                500..=599 => "SERVER_ERROR",
                _ => "HTTP_ERROR",
            },
            Self::Network(_) => "NETWORK_ERROR",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            Self::NoClient => "NO_CLIENT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// Check if this is a 404 from the server
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is a 403 from the server
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Check if the server rate-limited the request
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
