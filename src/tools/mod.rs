//! Tool module
//!
//! The loaders and processors behind each subcommand.

mod basic_data;
mod terminations;
mod times;

pub use basic_data::{BasicDataLoader, BasicDataProcessor, BasicDataSummary};
pub use terminations::{TerminationSummary, TerminationsLoader, TerminationsProcessor};
pub use times::{AvgTimesLoader, CcdfProcessor, MaxTotalTimesLoader, TotalTimesLoader};
