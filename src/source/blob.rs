use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;
use url::Url;

use crate::tools::InputMode;

use super::Result;
use super::preview::looks_like_svg;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let content_type = guess_content_type(&name, &bytes).to_string();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_content_type(name: &str, bytes: &[u8]) -> &'static str {
    if looks_like_svg(bytes) {
        return "image/svg+xml";
    }
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".svg") {
        return "image/svg+xml";
    }
    ImageFormat::from_path(&lower)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(FileBlob),
    Url(Url),
}

impl ImageSource {
    pub fn mode(&self) -> InputMode {
        match self {
            Self::File(_) => InputMode::File,
            Self::Url(_) => InputMode::Url,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::File(blob) => blob.name(),
            Self::Url(url) => url.as_str(),
        }
    }
}
