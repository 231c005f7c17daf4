//! Data-set configuration
//!
//! A configuration names the datasets of a run. Each dataset has a label, a
//! data directory and, for charting tools, an optional line style.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::constants::TRACE_PAIR_SEPARATOR;
use crate::errors::{
    Result, config_parsing_error, generic_error, missing_data_directory_error,
};
use crate::files::{Directory, EmptyDirectory, FileContainer, LabeledFileContainer};
use crate::labels::{Label, Protocol};
use crate::report::LineStyle;

/// Value stored under a label in a configuration file
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DataSetEntry {
    /// `"label": "dir"`
    Directory(String),
    /// `"label": { "data": "dir", "line": { ... } }`
    Trace {
        data: String,
        #[serde(default)]
        line: JsonValue,
    },
}

/// One labeled dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    pub label: Label,
    /// `None` when no directory was given; such a dataset has no files
    pub directory: Option<PathBuf>,
    /// Raw line style, validated when the trace lines are built
    pub line: JsonValue,
}

impl DataSet {
    pub fn new(label: impl Into<Label>, directory: Option<PathBuf>) -> Self {
        DataSet {
            label: label.into(),
            directory,
            line: JsonValue::Null,
        }
    }
}

/// Every dataset of a run, in configuration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSetConfig {
    data_sets: Vec<DataSet>,
}

impl DataSetConfig {
    pub fn new(data_sets: Vec<DataSet>) -> Self {
        DataSetConfig { data_sets }
    }

    /// Builds the configuration from a parsed JSON document
    ///
    /// # Errors
    /// Fails when the document is not an object of label entries or when a
    /// directory cannot be expanded
    pub fn from_json(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(entries) = value else {
            return Err(generic_error(
                "Configuration must be a JSON object mapping labels to data directories",
            ));
        };

        let mut data_sets = Vec::with_capacity(entries.len());
        for (label, entry) in entries {
            let entry: DataSetEntry = serde_json::from_value(entry).map_err(|e| {
                config_parsing_error(e, &format!("Invalid entry for label '{label}'"))
            })?;

            let (directory, line) = match entry {
                DataSetEntry::Directory(directory) => (directory, JsonValue::Null),
                DataSetEntry::Trace { data, line } => (data, line),
            };

            data_sets.push(DataSet {
                label: Label::from(label),
                directory: Some(expand_path(&directory)?),
                line,
            });
        }

        Ok(DataSetConfig { data_sets })
    }

    /// Builds the configuration from `LABEL=DIR` pairs
    ///
    /// Each pair is split on its first `=`, so directories may contain `=`.
    pub fn from_trace_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let data_sets = pairs
            .iter()
            .map(|pair| {
                let (label, directory) = parse_trace_pair(pair.as_ref())?;
                Ok(DataSet::new(label, Some(expand_path(directory)?)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DataSetConfig { data_sets })
    }

    /// Builds the configuration of the per-protocol tools
    ///
    /// Every protocol gets a dataset; protocols without a directory stay
    /// empty.
    pub fn from_protocols(directories: Vec<(Protocol, Option<String>)>) -> Result<Self> {
        let data_sets = directories
            .into_iter()
            .map(|(protocol, directory)| {
                let directory = directory.as_deref().map(expand_path).transpose()?;
                Ok(DataSet::new(protocol, directory))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DataSetConfig { data_sets })
    }

    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.data_sets.iter().map(|data_set| &data_set.label).collect()
    }

    pub fn len(&self) -> usize {
        self.data_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_sets.is_empty()
    }

    /// Checks every data directory and builds the labeled container
    ///
    /// This runs before any file is read.
    ///
    /// # Errors
    /// The first directory that does not exist fails with a missing data
    /// directory error, unless `ignore_non_existing` is set; an ignored
    /// directory is replaced by an empty one
    pub fn check_directories(&self, ignore_non_existing: bool) -> Result<LabeledFileContainer> {
        let mut container = LabeledFileContainer::new();

        for data_set in &self.data_sets {
            let entry: Box<dyn FileContainer> = match &data_set.directory {
                None => Box::new(EmptyDirectory),
                Some(path) if path.is_dir() => Box::new(Directory::new(path)),
                Some(path) if ignore_non_existing => {
                    warn!(
                        "Ignoring data directory of '{}': {} does not exist",
                        data_set.label,
                        path.display()
                    );
                    Box::new(EmptyDirectory)
                }
                Some(path) => return Err(missing_data_directory_error(path.clone())),
            };

            debug!("Dataset '{}': {}", data_set.label, entry.describe());
            container.insert(data_set.label.clone(), entry);
        }

        Ok(container)
    }

    /// Line style of every dataset
    ///
    /// # Errors
    /// Fails with a trace configuration error for the first invalid style
    pub fn trace_lines(&self) -> Result<HashMap<Label, LineStyle>> {
        self.data_sets
            .iter()
            .map(|data_set| Ok((data_set.label.clone(), LineStyle::from_json(&data_set.line)?)))
            .collect()
    }
}

/// Splits `LABEL=DIR` on the first separator
///
/// # Errors
/// Fails when the separator is missing or either side is empty
pub fn parse_trace_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once(TRACE_PAIR_SEPARATOR) {
        Some((label, directory)) if !label.is_empty() && !directory.is_empty() => {
            Ok((label, directory))
        }
        _ => Err(generic_error(&format!(
            "Invalid trace '{pair}': expected LABEL{TRACE_PAIR_SEPARATOR}DIR"
        ))),
    }
}

/// Expands `~` and environment variables in a directory path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| config_parsing_error(e, &format!("Cannot expand path '{path}'")))?;
    Ok(Path::new(expanded.as_ref()).to_path_buf())
}
