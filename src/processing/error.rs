use thiserror::Error;

use crate::request::RequestError;
use crate::source::SourceError;
use crate::tools::ToolError;
use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("input error: {0}")]
    Source(#[from] SourceError),

    #[error("request error: {0}")]
    Request(#[from] RequestError),

    #[error("processing request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("output I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
