//! Output module
//!
//! CSV reports, trace tables, console dumps and HTML charts.

mod csv_printer;
mod plotter;
mod trace;

pub use csv_printer::{CsvPrinter, CsvRow, csv_row};
pub use plotter::{LineShape, LineStyle, Plotter};
pub use trace::{ConsoleTraceSink, TraceData, TraceSet, TraceSink, TraceTablePrinter};
