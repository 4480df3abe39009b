use thiserror::Error;

use crate::config::ConfigError;
use crate::processing::ProcessingError;
use crate::source::SourceError;
use crate::tools::ToolError;
use crate::transport::TransportError;
use crate::workflow::WorkflowError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("input error: {0}")]
    Source(#[from] SourceError),

    #[error("client setup failed: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("job error: {0}")]
    Workflow(#[from] WorkflowError),
}
