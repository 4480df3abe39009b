use std::path::Path;

use crate::config::{read_file, write_file};

use super::{JobReport, JobSpec, Result, WorkflowError};

pub fn load_job(path: impl AsRef<Path>) -> Result<JobSpec> {
    let job: JobSpec = read_file::<_, WorkflowError>(path.as_ref())?;
    job.validate()?;
    Ok(job)
}

pub fn save_report(path: impl AsRef<Path>, report: &JobReport) -> Result<()> {
    write_file::<_, WorkflowError>(path.as_ref(), report)
}
