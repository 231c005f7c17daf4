//! Configuration module
//!
//! This module loads the JSON files that map dataset labels to their data
//! directories and line styles.

mod loader;
mod model;

pub use loader::load_config;
pub use model::{DataSet, DataSetConfig, DataSetEntry, expand_path, parse_trace_pair};
