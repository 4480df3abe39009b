use tempfile::tempdir;

use std::path::Path;

use super::{ClientConfig, ConfigError, DEFAULT_BASE_URL, FileFormat, read_file, write_file};

#[test]
fn defaults_are_valid() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    config.validate().expect("default config");
    assert!(config.token().is_none());
}

#[test]
fn yaml_and_json_files_load_with_defaults_for_missing_keys() {
    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("client.yaml");
    std::fs::write(&yaml, "base_url: https://img.example.com\ntoken: secret\n").expect("write");
    let config = ClientConfig::load(&yaml).expect("yaml");
    assert_eq!(config.base_url, "https://img.example.com");
    assert_eq!(config.token(), Some("secret"));
    assert_eq!(config.read_timeout_secs, ClientConfig::default().read_timeout_secs);

    let json = dir.path().join("client.json");
    std::fs::write(&json, r#"{"read_timeout_secs": 5}"#).expect("write");
    let config = ClientConfig::load(&json).expect("json");
    assert_eq!(config.read_timeout_secs, 5);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn invalid_settings_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("client.json");

    std::fs::write(&path, r#"{"base_url": "ftp://files.example.com"}"#).expect("write");
    assert!(ClientConfig::load(&path).is_err());

    std::fs::write(&path, r#"{"connect_timeout_secs": 0}"#).expect("write");
    let error = ClientConfig::load(&path).expect_err("zero timeout");
    assert!(error.to_string().contains("timeouts"));

    std::fs::write(&path, r#"{"base_url": "http://x", "colour": "red"}"#).expect("write");
    assert!(ClientConfig::load(&path).is_err());
}

#[test]
fn blank_tokens_are_ignored() {
    let config = ClientConfig {
        token: Some("   ".to_string()),
        ..ClientConfig::default()
    };
    assert!(config.token().is_none());
}

#[test]
fn file_format_follows_the_extension() {
    assert_eq!(FileFormat::from_path(Path::new("job.YML")), FileFormat::Yaml);
    assert_eq!(FileFormat::from_path(Path::new("client.yaml")), FileFormat::Yaml);
    assert_eq!(FileFormat::from_path(Path::new("report.json")), FileFormat::Json);
    assert_eq!(FileFormat::from_path(Path::new("settings")), FileFormat::Json);

    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("client.Yaml");
    let config = ClientConfig {
        token: Some("secret".to_string()),
        ..ClientConfig::default()
    };
    write_file::<_, ConfigError>(&yaml, &config).expect("write yaml");
    let written = std::fs::read_to_string(&yaml).expect("read");
    assert!(written.contains("token: secret"));
    assert_eq!(ClientConfig::load(&yaml).expect("load"), config);

    let json = dir.path().join("client.json");
    std::fs::write(&json, "base_url: http://x\n").expect("write");
    let error = read_file::<ClientConfig, ConfigError>(&json).expect_err("yaml text in a json file");
    assert!(matches!(error, ConfigError::SerdeJson(_)));
    let error = read_file::<ClientConfig, ConfigError>(&dir.path().join("absent.yml"))
        .expect_err("missing file");
    assert!(matches!(error, ConfigError::Io(_)));
}
