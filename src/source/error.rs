use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("not a valid absolute URL: {0}")]
    InvalidUrl(String),

    #[error("only http and https URLs are supported, got `{0}`")]
    UnsupportedScheme(String),

    #[error("URL does not appear to be an image file: {0}")]
    NotAnImage(String),

    #[error("could not load image from {url}: {reason}")]
    LoadFailed { url: String, reason: String },

    #[error("could not decode `{name}` as an image: {reason}")]
    DecodeFailed { name: String, reason: String },

    #[error("{0}")]
    Rejected(String),

    #[error("source I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
