use std::path::Path;

use crate::workflow::{JobReport, JobSpec, load_job, run_job, save_report};

use super::{ProcessService, Result};

#[derive(Debug, Clone)]
pub struct JobService {
    process: ProcessService,
}

impl JobService {
    pub fn new(process: ProcessService) -> Self {
        Self { process }
    }

    pub fn load_job(&self, path: impl AsRef<Path>) -> Result<JobSpec> {
        Ok(load_job(path)?)
    }

    pub fn run(&self, job: &JobSpec, base_dir: &Path) -> Result<JobReport> {
        Ok(run_job(job, base_dir, self.process.processor())?)
    }

    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<JobReport> {
        let path = path.as_ref();
        let job = self.load_job(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        self.run(&job, base_dir)
    }

    pub fn save_report(&self, path: impl AsRef<Path>, report: &JobReport) -> Result<()> {
        save_report(path, report)?;
        Ok(())
    }
}
