use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint address: {0}")]
    InvalidEndpoint(String),

    #[error("server answered HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("could not read response body: {0}")]
    Body(#[from] std::io::Error),

    #[error("response exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
}
