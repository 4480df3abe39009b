use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::ImageReader;
use serde::Serialize;
use url::Url;

use super::{FileBlob, Result, SourceError};

const SVG_MIME: &str = "image/svg+xml";
const SVG_SNIFF_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub content_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Data {
        data_url: String,
        info: ImageInfo,
    },
    Remote {
        url: Url,
        info: ImageInfo,
    },
}

impl Preview {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Data { data_url, .. } => data_url,
            Self::Remote { url, .. } => url.as_str(),
        }
    }

    pub fn info(&self) -> &ImageInfo {
        match self {
            Self::Data { info, .. } | Self::Remote { info, .. } => info,
        }
    }
}

/// True when the first element of the document is `<svg`, after an optional
/// BOM, XML declaration, comments and doctype.
pub(crate) fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_BYTES)];
    let text = String::from_utf8_lossy(head);
    let mut rest = text.trim_start_matches('\u{feff}');
    loop {
        rest = rest.trim_start();
        let skipped = if rest.starts_with("<?") {
            rest.find("?>").map(|end| end + 2)
        } else if rest.starts_with("<!--") {
            rest.find("-->").map(|end| end + 3)
        } else if rest.starts_with("<!") {
            rest.find('>').map(|end| end + 1)
        } else {
            break;
        };
        match skipped {
            Some(end) => rest = &rest[end..],
            None => return false,
        }
    }
    rest.strip_prefix("<svg").is_some_and(|after| {
        after
            .chars()
            .next()
            .is_some_and(|next| next.is_whitespace() || next == '>' || next == '/')
    })
}

pub fn inspect_image(bytes: &[u8]) -> std::result::Result<ImageInfo, String> {
    if looks_like_svg(bytes) {
        return Ok(ImageInfo {
            content_type: SVG_MIME,
            dimensions: None,
        });
    }
    let format = image::guess_format(bytes).map_err(|error| error.to_string())?;
    let dimensions = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|error| error.to_string())?;
    Ok(ImageInfo {
        content_type: format.to_mime_type(),
        dimensions: Some(dimensions),
    })
}

pub fn decode_preview(blob: &FileBlob) -> Result<Preview> {
    let info = inspect_image(blob.bytes()).map_err(|reason| SourceError::DecodeFailed {
        name: blob.name().to_string(),
        reason,
    })?;
    let data_url = format!(
        "data:{};base64,{}",
        info.content_type,
        BASE64_STANDARD.encode(blob.bytes())
    );
    Ok(Preview::Data { data_url, info })
}
