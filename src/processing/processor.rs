use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::request::{BuilderRegistry, ToolInputs};
use crate::source::{FileBlob, ImageProbe, ImageSource, InputResolver};
use crate::tools::{EndpointDescriptor, SettingsBag};
use crate::transport::{BlobStore, ProcessingResult, RequestSender, ResultSlot};

use super::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    File(PathBuf),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedOutput {
    pub tool: &'static str,
    pub path: PathBuf,
    pub content_type: String,
    pub bytes: usize,
}

#[derive(Clone)]
pub struct Processor {
    builders: BuilderRegistry,
    sender: Arc<dyn RequestSender>,
    probe: Arc<dyn ImageProbe>,
    store: BlobStore,
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Processor")
            .field("builders", &self.builders)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Processor {
    pub fn new(
        builders: BuilderRegistry,
        sender: Arc<dyn RequestSender>,
        probe: Arc<dyn ImageProbe>,
        store: BlobStore,
    ) -> Self {
        Self {
            builders,
            sender,
            probe,
            store,
        }
    }

    pub fn probe(&self) -> &dyn ImageProbe {
        self.probe.as_ref()
    }

    pub fn store(&self) -> &BlobStore {
        &self.store
    }

    /// A missing extension on `output` is filled from the response type.
    #[tracing::instrument(skip_all, fields(tool = descriptor.name))]
    pub fn run(
        &self,
        descriptor: &'static EndpointDescriptor,
        primary: &SourceRef,
        secondary: Option<&SourceRef>,
        settings: &SettingsBag,
        output: &Path,
    ) -> Result<ProcessedOutput> {
        settings.validate(descriptor)?;

        let mut resolver = InputResolver::new(Arc::clone(&self.probe));
        let mut inputs = ToolInputs::single(resolve(&mut resolver, primary)?);
        if let Some(secondary) = secondary {
            inputs = inputs.with_secondary(resolve(&mut resolver, secondary)?);
        }

        let request = self.builders.build(descriptor, &inputs, settings)?;
        let response = self.sender.send(&request)?;

        let mut slot = ResultSlot::new();
        let result = slot.replace(ProcessingResult::from_response(&self.store, response));
        let path = output_path(output, result);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        result.save(&path)?;
        info!(path = %path.display(), "result written");

        Ok(ProcessedOutput {
            tool: descriptor.name,
            path,
            content_type: result.content_type().to_string(),
            bytes: result.bytes().len(),
        })
    }
}

fn resolve(resolver: &mut InputResolver, source: &SourceRef) -> Result<ImageSource> {
    match source {
        SourceRef::File(path) => {
            resolver.select_file(FileBlob::from_path(path)?);
        }
        SourceRef::Url(raw) => {
            resolver.select_url(raw)?;
        }
    }
    Ok(resolver.settle()?)
}

fn output_path(requested: &Path, result: &ProcessingResult) -> PathBuf {
    let mut path = requested.to_path_buf();
    if path.extension().is_none() {
        path.set_extension(result.suggested_extension());
    }
    path
}
