use url::Url;

use super::{Result, SourceError};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];

/// Cheap syntactic gate run before any network traffic: absolute http(s) URL
/// whose last path segment carries an image extension.
pub fn validate_image_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|error| SourceError::InvalidUrl(format!("{trimmed} ({error})")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SourceError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(SourceError::InvalidUrl(trimmed.to_string()));
    }

    let extension = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| extension.to_ascii_lowercase());
    match extension {
        Some(extension) if IMAGE_EXTENSIONS.contains(&extension.as_str()) => Ok(url),
        _ => Err(SourceError::NotAnImage(trimmed.to_string())),
    }
}
