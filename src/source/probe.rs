use std::io::Read;

use tracing::debug;
use url::Url;

use super::preview::{ImageInfo, inspect_image};
use super::{Result, SourceError};

pub trait ImageProbe: Send + Sync {
    fn probe(&self, url: &Url) -> Result<ImageInfo>;
}

#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl HttpImageProbe {
    pub fn new(agent: ureq::Agent, max_bytes: u64) -> Self {
        Self { agent, max_bytes }
    }
}

impl ImageProbe for HttpImageProbe {
    fn probe(&self, url: &Url) -> Result<ImageInfo> {
        let load_failed = |reason: String| SourceError::LoadFailed {
            url: url.to_string(),
            reason,
        };

        debug!(%url, "probing remote image");
        let response = self.agent.get(url.as_str()).call().map_err(|error| match error {
            ureq::Error::Status(code, _) => load_failed(format!("server answered HTTP {code}")),
            other => load_failed(other.to_string()),
        })?;
        let declared = response.content_type().to_ascii_lowercase();
        if matches!(declared.as_str(), "text/html" | "application/xhtml+xml") {
            return Err(load_failed(format!("served {declared}, not an image")));
        }

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(self.max_bytes)
            .read_to_end(&mut bytes)
            .map_err(|error| load_failed(error.to_string()))?;

        inspect_image(&bytes).map_err(|reason| {
            if declared.starts_with("image/") {
                load_failed(format!("body declared as {declared} does not decode: {reason}"))
            } else {
                load_failed(format!("served {declared}, not an image"))
            }
        })
    }
}
