use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if matches!(extension.as_str(), "yaml" | "yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

pub fn read_file<T, E>(path: &Path) -> Result<T, E>
where
    T: DeserializeOwned,
    E: From<std::io::Error> + From<serde_json::Error> + From<serde_yaml::Error>,
{
    let raw = fs::read_to_string(path)?;
    Ok(match FileFormat::from_path(path) {
        FileFormat::Yaml => serde_yaml::from_str(&raw)?,
        FileFormat::Json => serde_json::from_str(&raw)?,
    })
}

pub fn write_file<T, E>(path: &Path, value: &T) -> Result<(), E>
where
    T: Serialize + ?Sized,
    E: From<std::io::Error> + From<serde_json::Error> + From<serde_yaml::Error>,
{
    let serialized = match FileFormat::from_path(path) {
        FileFormat::Yaml => serde_yaml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };
    fs::write(path, serialized)?;
    Ok(())
}
