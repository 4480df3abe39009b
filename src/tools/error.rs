use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool `{tool}` does not declare a parameter named `{param}`")]
    UnknownParam { tool: String, param: String },

    #[error("invalid value for `{param}`: {reason}")]
    InvalidValue { param: String, reason: String },

    #[error("`{param}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("setting must look like `name=value`, got `{0}`")]
    InvalidAssignment(String),

    #[error("invalid frame selection: {0}")]
    InvalidFrames(String),
}
