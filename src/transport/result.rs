use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::{ApiResponse, BlobStore, ObjectUrl};

#[derive(Debug)]
pub struct ProcessingResult {
    bytes: Arc<[u8]>,
    content_type: String,
    object_url: ObjectUrl,
}

impl ProcessingResult {
    pub fn new(store: &BlobStore, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        let object_url = store.create(Arc::clone(&bytes));
        Self {
            bytes,
            content_type: content_type.into(),
            object_url,
        }
    }

    pub fn from_response(store: &BlobStore, response: ApiResponse) -> Self {
        Self::new(store, response.bytes, response.content_type)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn object_url(&self) -> &str {
        self.object_url.as_str()
    }

    pub fn suggested_extension(&self) -> &'static str {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/svg+xml" => "svg",
            "application/zip" | "application/x-zip-compressed" => "zip",
            _ => "bin",
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, &self.bytes)
    }
}

/// Holds the latest result of a view; replacing or dropping it releases the
/// previous object URL.
#[derive(Debug, Default)]
pub struct ResultSlot {
    current: Option<ProcessingResult>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, result: ProcessingResult) -> &ProcessingResult {
        self.current.insert(result)
    }

    pub fn current(&self) -> Option<&ProcessingResult> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<ProcessingResult> {
        self.current.take()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
