use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    /// Backend answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection, TLS or timeout failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Backend envelope carried `success: false`.
    #[error("API error: {0}")]
    Api(String),
}

impl Error {
    /// True when the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Http { status: 404, .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self { Error::Decode(e.to_string()) }
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self { Error::InvalidConfig(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, Error>;
