//! Pipeline module
//!
//! Every tool is the same three stages: a selector picks data files, a loader
//! reads them and a processor turns the loaded data into output.

mod application;
mod stages;

pub use application::{Application, RunSummary};
pub use stages::{DataLoader, DataProcessor};
