//! Traces and the sinks that consume them

use std::path::{Path, PathBuf};

use log::info;

use crate::constants::BINS_COLUMN;
use crate::errors::{Result, generic_error};
use crate::labels::Label;
use crate::logging::format_message;
use crate::stats::Histogram;

use super::csv_printer::{CsvPrinter, CsvRow};

/// A named series of points
#[derive(Debug, Clone, PartialEq)]
pub struct TraceData {
    label: Label,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TraceData {
    /// # Errors
    /// Fails when `x` and `y` differ in length
    pub fn new(label: Label, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(generic_error(&format!(
                "Trace '{label}' has {} x values but {} y values",
                x.len(),
                y.len()
            )));
        }
        Ok(TraceData { label, x, y })
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// CCDF traces sharing one histogram layout
#[derive(Debug, Clone)]
pub struct TraceSet {
    edges: Vec<f64>,
    traces: Vec<(TraceData, Histogram)>,
}

impl TraceSet {
    pub fn new(edges: Vec<f64>) -> Self {
        TraceSet {
            edges,
            traces: Vec::new(),
        }
    }

    /// Adds the CCDF trace of `histogram` under `label`
    ///
    /// # Errors
    /// Fails when the histogram does not use this set's bin edges
    pub fn push(&mut self, label: Label, histogram: Histogram) -> Result<()> {
        if histogram.edges() != self.edges {
            return Err(generic_error(&format!(
                "Histogram of '{label}' does not share the bins of the other traces"
            )));
        }

        let trace = TraceData::new(label, histogram.bin_lower_edges(), histogram.ccdf())?;
        self.traces.push((trace, histogram));
        Ok(())
    }

    /// Every bin edge, including the upper edge of the last bin
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn traces(&self) -> impl Iterator<Item = &TraceData> {
        self.traces.iter().map(|(trace, _)| trace)
    }

    pub fn histograms(&self) -> impl Iterator<Item = (&Label, &Histogram)> {
        self.traces
            .iter()
            .map(|(trace, histogram)| (trace.label(), histogram))
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Destination for computed traces
pub trait TraceSink {
    fn write_traces(&self, traces: &TraceSet) -> Result<()>;
}

/// Writes traces as a table: a bins column plus one column per label
///
/// There is one row per bin, keyed by its lower edge, followed by a final
/// row holding only the upper edge of the last bin.
#[derive(Debug, Clone)]
pub struct TraceTablePrinter {
    output: PathBuf,
}

impl TraceTablePrinter {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        TraceTablePrinter {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl TraceSink for TraceTablePrinter {
    fn write_traces(&self, traces: &TraceSet) -> Result<()> {
        let mut printer = CsvPrinter::create(&self.output)?;

        let mut headers = vec![BINS_COLUMN.to_string()];
        headers.extend(traces.traces().map(|trace| trace.label().to_string()));
        printer.set_headers(headers)?;

        let edges = traces.edges();
        let bins = edges.len().saturating_sub(1);
        for (i, edge) in edges.iter().take(bins).enumerate() {
            let mut row: CsvRow = vec![(BINS_COLUMN.to_string(), edge.to_string())];
            row.extend(
                traces
                    .traces()
                    .map(|trace| (trace.label().to_string(), trace.y()[i].to_string())),
            );
            printer.print_row(&row)?;
        }

        if let Some(last) = edges.last() {
            printer.print_row(&[(BINS_COLUMN.to_string(), last.to_string())])?;
        }

        printer.finish()?;
        info!("Trace table written to {}", self.output.display());
        Ok(())
    }
}

/// Prints each trace's non-empty bins to the console
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTraceSink;

impl TraceSink for ConsoleTraceSink {
    fn write_traces(&self, traces: &TraceSet) -> Result<()> {
        let edges = traces.edges();

        for (label, histogram) in traces.histograms() {
            let heading = format_message(
                label.as_str(),
                &colored::Colorize::bold(label.as_str()).to_string(),
            );
            println!("{heading}");
            println!("----------------------");
            println!("samples: {}", histogram.total());

            let ccdf = histogram.ccdf();
            for (i, count) in histogram.counts().iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                println!(
                    "[{}, {}): hist={} cum={}",
                    edges[i],
                    edges[i + 1],
                    count,
                    ccdf[i]
                );
            }
            println!();
        }

        Ok(())
    }
}
