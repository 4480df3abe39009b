mod error;
mod execute;
mod io;
mod report;
mod spec;

#[cfg(test)]
mod tests;

pub use error::{Result, WorkflowError};
pub use execute::run_job;
pub use io::{load_job, save_report};
pub use report::{JobReport, StepReport};
pub use spec::{JobSpec, JobStep};
