//! Termination-time tools
//!
//! Loaders that collect termination times by label and the processor that
//! turns them into CCDF traces.

use log::debug;

use crate::constants::{COLUMN_AVG_TIME, COLUMN_TOTAL_TIME};
use crate::errors::Result;
use crate::files::Selection;
use crate::labels::ByLabel;
use crate::pipeline::{DataLoader, DataProcessor};
use crate::records::DataFile;
use crate::report::{TraceSet, TraceSink};
use crate::stats::Histogram;

/// Every row's total termination time
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalTimesLoader;

impl DataLoader for TotalTimesLoader {
    type Output = ByLabel<f64>;

    fn load(&self, data_files: &Selection) -> Result<Self::Output> {
        let mut times = ByLabel::new();

        for (label, path) in data_files.iter_by_label() {
            DataFile::open(path)?.for_each_row(|row| {
                let time: u64 = row.parse(COLUMN_TOTAL_TIME)?;
                times.push(label, time as f64);
                Ok(())
            })?;
        }

        Ok(times)
    }
}

/// The largest total termination time of each file
///
/// A file without rows counts as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxTotalTimesLoader;

impl DataLoader for MaxTotalTimesLoader {
    type Output = ByLabel<f64>;

    fn load(&self, data_files: &Selection) -> Result<Self::Output> {
        let mut times = ByLabel::new();

        for (label, path) in data_files.iter_by_label() {
            let mut max_time = 0_u64;
            DataFile::open(path)?.for_each_row(|row| {
                let time: u64 = row.parse(COLUMN_TOTAL_TIME)?;
                max_time = max_time.max(time);
                Ok(())
            })?;

            debug!("{}: max termination time {max_time}", path.display());
            times.push(label, max_time as f64);
        }

        Ok(times)
    }
}

/// Every row's average termination time
#[derive(Debug, Clone, Copy, Default)]
pub struct AvgTimesLoader;

impl DataLoader for AvgTimesLoader {
    type Output = ByLabel<f64>;

    fn load(&self, data_files: &Selection) -> Result<Self::Output> {
        let mut times = ByLabel::new();

        for (label, path) in data_files.iter_by_label() {
            DataFile::open(path)?.for_each_row(|row| {
                times.push(label, row.parse_finite(COLUMN_AVG_TIME)?);
                Ok(())
            })?;
        }

        Ok(times)
    }
}

/// Builds one CCDF trace per label and hands the set to every sink
///
/// All traces share the termination-time histogram layout.
pub struct CcdfProcessor {
    sinks: Vec<Box<dyn TraceSink>>,
}

impl CcdfProcessor {
    pub fn new(sinks: Vec<Box<dyn TraceSink>>) -> Self {
        CcdfProcessor { sinks }
    }

    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Computes the traces without writing them anywhere
    pub fn traces(&self, times: &ByLabel<f64>) -> Result<TraceSet> {
        let layout = Histogram::termination_times();
        let mut traces = TraceSet::new(layout.edges());

        for (label, values) in times.iter() {
            let histogram = layout.with_values(values.iter().copied());
            debug!("Trace '{label}': {} values", histogram.total());
            traces.push(label.clone(), histogram)?;
        }

        Ok(traces)
    }
}

impl DataProcessor for CcdfProcessor {
    type Input = ByLabel<f64>;

    fn process(&self, data: Self::Input) -> Result<()> {
        let traces = self.traces(&data)?;
        for sink in &self.sinks {
            sink.write_traces(&traces)?;
        }
        Ok(())
    }
}
