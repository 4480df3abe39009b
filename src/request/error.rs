use thiserror::Error;

pub type Result<T> = std::result::Result<T, RequestError>;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("tool `{tool}` needs a second image")]
    MissingSecondary { tool: String },

    #[error("tool `{tool}` takes a single image")]
    UnexpectedSecondary { tool: String },

    #[error("tool `{tool}` needs both images as files or both as URLs")]
    MixedModes { tool: String },
}
