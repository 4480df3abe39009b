use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    pub tool: String,
    pub source: String,
    pub duration_ms: u128,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobReport {
    pub job_name: Option<String>,
    pub steps: Vec<StepReport>,
    pub succeeded: usize,
    pub failed: usize,
}

impl JobReport {
    pub fn from_steps(job_name: Option<String>, steps: Vec<StepReport>) -> Self {
        let succeeded = steps.iter().filter(|step| step.succeeded()).count();
        let failed = steps.len() - succeeded;
        Self {
            job_name,
            steps,
            succeeded,
            failed,
        }
    }
}
