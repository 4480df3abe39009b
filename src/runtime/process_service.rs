use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::processing::{ProcessedOutput, Processor, SourceRef};
use crate::source::{FileBlob, ImageInfo, Preview, decode_preview, validate_image_url};
use crate::tools::{SettingsBag, descriptor};
use crate::transport::BlobStore;

use super::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub tool: String,
    pub primary: SourceRef,
    pub secondary: Option<SourceRef>,
    pub assignments: Vec<String>,
    pub defaults: bool,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlCheck {
    pub url: String,
    #[serde(flatten)]
    pub info: ImageInfo,
}

#[derive(Debug, Clone)]
pub struct ProcessService {
    processor: Processor,
}

impl ProcessService {
    pub fn new(processor: Processor) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn store(&self) -> &BlobStore {
        self.processor.store()
    }

    pub fn preview(&self, path: impl AsRef<Path>) -> Result<Preview> {
        let blob = FileBlob::from_path(path)?;
        Ok(decode_preview(&blob)?)
    }

    pub fn check_url(&self, raw: &str) -> Result<UrlCheck> {
        let url = validate_image_url(raw)?;
        let info = self.processor.probe().probe(&url)?;
        Ok(UrlCheck {
            url: url.to_string(),
            info,
        })
    }

    pub fn process(&self, request: &ProcessRequest) -> Result<ProcessedOutput> {
        let descriptor = descriptor(request.tool.trim())?;
        let mut settings = if request.defaults {
            SettingsBag::with_defaults(descriptor)
        } else {
            SettingsBag::new()
        };
        for assignment in &request.assignments {
            settings.set_from_str(descriptor, assignment)?;
        }

        Ok(self.processor.run(
            descriptor,
            &request.primary,
            request.secondary.as_ref(),
            &settings,
            &request.output,
        )?)
    }
}
