use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Result, WorkflowError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobSpec {
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<JobStep>,
}

/// One tool call. Relative paths resolve against the job file's directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JobStep {
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_url: Option<String>,
    #[serde(default)]
    pub settings: Value,
    pub output: String,
}

impl JobStep {
    pub fn source_label(&self) -> &str {
        self.file
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }
}

impl JobSpec {
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(WorkflowError::Parse(
                "job must include at least one step".to_string(),
            ));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.tool.trim().is_empty() {
                return Err(WorkflowError::Parse(format!(
                    "step at index {index} has an empty tool name"
                )));
            }
            if step.file.is_some() == step.url.is_some() {
                return Err(WorkflowError::Parse(format!(
                    "step `{}` must set exactly one of `file` or `url`",
                    step.tool
                )));
            }
            if step.overlay_file.is_some() && step.overlay_url.is_some() {
                return Err(WorkflowError::Parse(format!(
                    "step `{}` sets both `overlay_file` and `overlay_url`",
                    step.tool
                )));
            }
            if !step.settings.is_object() && !step.settings.is_null() {
                return Err(WorkflowError::Parse(format!(
                    "step `{}` settings must be a JSON object",
                    step.tool
                )));
            }
            if step.output.trim().is_empty() {
                return Err(WorkflowError::Parse(format!(
                    "step `{}` has an empty output path",
                    step.tool
                )));
            }
        }
        Ok(())
    }
}
