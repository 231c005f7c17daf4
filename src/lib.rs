pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod files;
pub mod labels;
pub mod logging;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod stats;
pub mod tools;

pub mod prelude {
    pub use crate::cli::{build_cli, get_log_file, get_matches, get_verbosity};
    pub use crate::commands::run_command;
    pub use crate::errors::{
        config_parsing_error, csv_error, file_operation_error, generic_error, glob_pattern_error,
        malformed_record_error, missing_config_file_error, missing_data_directory_error,
        trace_configuration_error,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::labels::{ByLabel, Label, Protocol};
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::pipeline::{Application, DataLoader, DataProcessor, RunSummary};
}
