use glob::PatternError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the data tools
#[derive(Debug)]
pub enum Error {
    /// The configuration file given on the command line does not exist
    MissingConfigFile { path: PathBuf },
    /// A data directory named in the configuration does not exist
    MissingDataDirectory { path: PathBuf },
    /// A data row is missing a column or holds a value that cannot be parsed
    MalformedRecord {
        file: PathBuf,
        row: usize,
        column: String,
    },
    /// A trace line style was rejected
    TraceConfiguration { detail: String },
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error raised by the CSV reader or writer
    Csv { source: csv::Error, path: PathBuf },
    /// Error related to configuration parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
    /// Error related to glob pattern matching
    GlobPattern {
        source: PatternError,
        pattern: String,
    },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingConfigFile { path } => {
                write!(f, "Configuration file was not found: {}", path.display())
            }
            Error::MissingDataDirectory { path } => {
                write!(f, "Data directory not found: {}", path.display())
            }
            Error::MalformedRecord { file, row, column } => {
                write!(
                    f,
                    "Malformed record in {} (row {row}): invalid or missing column '{column}'",
                    file.display()
                )
            }
            Error::TraceConfiguration { detail } => {
                write!(f, "trace configuration error: {detail}")
            }
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::Csv { source, path } => {
                write!(f, "CSV error in {}: {source}", path.display())
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Configuration parsing error: {detail}")
            }
            Error::GlobPattern { pattern, .. } => {
                write!(f, "Invalid glob pattern: {pattern}")
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::Csv { source, .. } => Some(source),
            Error::GlobPattern { source, .. } => Some(source),
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::FileOperation {
            source: err,
            path: PathBuf::new(),
            operation: "perform operation on".to_string(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv {
            source: err,
            path: PathBuf::new(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        let detail = err.to_string();
        Error::ConfigParsing {
            source: Box::new(err),
            detail,
        }
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Error::GlobPattern {
            source: err,
            pattern: String::new(),
        }
    }
}

/// Custom Result type for the data tools
///
/// # Examples
/// ```
/// use ssbgp_data_tools::prelude::{Result, generic_error};
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
///
///     // Or return an error
///     // Err(generic_error("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a missing configuration file error
pub fn missing_config_file_error(path: PathBuf) -> Error {
    Error::MissingConfigFile { path }
}

/// Helper function to create a missing data directory error
pub fn missing_data_directory_error(path: PathBuf) -> Error {
    Error::MissingDataDirectory { path }
}

/// Helper function to create a malformed record error
pub fn malformed_record_error(file: PathBuf, row: usize, column: &str) -> Error {
    Error::MalformedRecord {
        file,
        row,
        column: column.to_string(),
    }
}

/// Helper function to create a trace configuration error
///
/// Only the first line of `detail` is kept.
pub fn trace_configuration_error(detail: &str) -> Error {
    Error::TraceConfiguration {
        detail: detail.lines().next().unwrap_or_default().to_string(),
    }
}

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a CSV error bound to a file
pub fn csv_error(err: csv::Error, path: PathBuf) -> Error {
    Error::Csv { source: err, path }
}

/// Helper function to create a config parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

/// Helper function to create a glob pattern error
pub fn glob_pattern_error(err: PatternError, pattern: &str) -> Error {
    Error::GlobPattern {
        source: err,
        pattern: pattern.to_string(),
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
