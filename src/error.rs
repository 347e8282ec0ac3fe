use thiserror::Error;

use crate::domain::ProviderId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown model '{model}' for provider {provider}")]
    UnknownModel { provider: ProviderId, model: String },

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of body characters carried by [`Error::Status`].
pub const STATUS_BODY_LIMIT: usize = 500;

impl Error {
    /// Build a status error, truncating the body on a char boundary.
    pub fn status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(STATUS_BODY_LIMIT) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Error::Status { status, body }
    }
}
