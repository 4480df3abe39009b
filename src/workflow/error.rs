use thiserror::Error;

use crate::processing::ProcessingError;
use crate::tools::ToolError;

pub type Result<T> = std::result::Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("job file parse failure: {0}")]
    Parse(String),

    #[error("job I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("job serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("job YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}
