//! Data records module
//!
//! This module reads the simulator's CSV output and holds the per-destination
//! records built from it.

mod model;
mod reader;

pub use model::{DestinationData, SampleMetrics, TerminationCounts};
pub use reader::{DataFile, Row};
