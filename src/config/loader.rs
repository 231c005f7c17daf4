//! Configuration loading functionality

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value as JsonValue;

use crate::errors::{
    Result, config_parsing_error, file_operation_error, missing_config_file_error,
};

use super::model::DataSetConfig;

/// Loads a data-set configuration from a JSON file
///
/// # Errors
/// Fails with a missing configuration file error when `file` is not an
/// existing regular file, and with a configuration parsing error when it is
/// not valid JSON
pub fn load_config(file: &Path) -> Result<DataSetConfig> {
    if !file.is_file() {
        return Err(missing_config_file_error(file.to_path_buf()));
    }

    let content = fs::read_to_string(file)
        .map_err(|e| file_operation_error(e, file.to_path_buf(), "read"))?;

    let value: JsonValue = serde_json::from_str(&content).map_err(|e| {
        let detail = format!("Failed to parse configuration file {}: {e}", file.display());
        config_parsing_error(e, &detail)
    })?;

    let config = DataSetConfig::from_json(value)?;
    debug!(
        "Loaded {} datasets from {}",
        config.len(),
        file.display()
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_missing_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("conf.json");

        match load_config(&path) {
            Err(Error::MissingConfigFile { path: missing }) => assert_eq!(missing, path),
            other => panic!("Expected a missing configuration file error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_directory_is_missing_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().to_path_buf();

        match load_config(&path) {
            Err(Error::MissingConfigFile { path: missing }) => assert_eq!(missing, path),
            other => panic!("Expected a missing configuration file error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_invalid_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("conf.json");
        fs::write(&path, "{\"A\": ").unwrap();

        match load_config(&path) {
            Err(Error::ConfigParsing { detail, .. }) => {
                assert!(detail.contains("conf.json"));
            }
            other => panic!("Expected a config parsing error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_reads_labels() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("conf.json");
        fs::write(&path, r#"{"A": "/data/a", "B": "/data/b"}"#).unwrap();

        let config = load_config(&path).unwrap();
        let labels: Vec<&str> = config.labels().iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }
}
