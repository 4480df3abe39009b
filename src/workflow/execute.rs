use std::path::Path;
use std::time::Instant;

use serde_json::Map;
use tracing::{info, warn};

use crate::processing::{ProcessedOutput, Processor, SourceRef};
use crate::tools::{SettingsBag, descriptor};

use super::{JobReport, JobSpec, JobStep, Result, StepReport, WorkflowError};

/// Runs every step in order. A failing step is recorded in the report and
/// the run moves on to the next one.
#[tracing::instrument(skip_all, fields(job = job.name.as_deref().unwrap_or("unnamed")))]
pub fn run_job(job: &JobSpec, base_dir: &Path, processor: &Processor) -> Result<JobReport> {
    job.validate()?;

    let mut steps = Vec::with_capacity(job.steps.len());
    for (index, step) in job.steps.iter().enumerate() {
        let started = Instant::now();
        let outcome = run_step(step, base_dir, processor);
        let duration_ms = started.elapsed().as_millis();
        let mut report = StepReport {
            tool: step.tool.clone(),
            source: step.source_label().to_string(),
            duration_ms,
            output: None,
            content_type: None,
            bytes: None,
            error: None,
        };
        match outcome {
            Ok(output) => {
                info!(index, tool = %step.tool, output = %output.path.display(), "step finished");
                report.output = Some(output.path.display().to_string());
                report.content_type = Some(output.content_type);
                report.bytes = Some(output.bytes);
            }
            Err(error) => {
                warn!(index, tool = %step.tool, %error, "step failed");
                report.error = Some(error.to_string());
            }
        }
        steps.push(report);
    }

    Ok(JobReport::from_steps(job.name.clone(), steps))
}

fn run_step(step: &JobStep, base_dir: &Path, processor: &Processor) -> Result<ProcessedOutput> {
    let descriptor = descriptor(step.tool.trim())?;
    let settings = match step.settings.as_object() {
        Some(object) => SettingsBag::from_json(descriptor, object)?,
        None => SettingsBag::from_json(descriptor, &Map::new())?,
    };

    let primary = source_ref(base_dir, step.file.as_deref(), step.url.as_deref()).ok_or_else(|| {
        WorkflowError::Parse(format!("step `{}` has no input image", step.tool))
    })?;
    let secondary = source_ref(
        base_dir,
        step.overlay_file.as_deref(),
        step.overlay_url.as_deref(),
    );

    Ok(processor.run(
        descriptor,
        &primary,
        secondary.as_ref(),
        &settings,
        &base_dir.join(&step.output),
    )?)
}

fn source_ref(base_dir: &Path, file: Option<&str>, url: Option<&str>) -> Option<SourceRef> {
    match (file, url) {
        (Some(file), _) => Some(SourceRef::File(base_dir.join(file))),
        (None, Some(url)) => Some(SourceRef::Url(url.to_string())),
        (None, None) => None,
    }
}
