//! CSV output
//!
//! Reports are plain comma-separated files with a header row.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::debug;

use crate::errors::{Result, csv_error, file_operation_error, generic_error};

/// One output row as `(column, value)` pairs
pub type CsvRow = Vec<(String, String)>;

/// Writes rows keyed by column name
///
/// The header is either set explicitly or taken from the keys of the first
/// row. Columns a row does not mention are left empty.
pub struct CsvPrinter {
    path: PathBuf,
    writer: Writer<File>,
    headers: Option<Vec<String>>,
    rows: usize,
}

impl CsvPrinter {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).map_err(|e| file_operation_error(e, path.to_path_buf(), "create"))?;

        Ok(CsvPrinter {
            path: path.to_path_buf(),
            writer: Writer::from_writer(file),
            headers: None,
            rows: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header row
    ///
    /// # Errors
    /// Fails when a header was already written
    pub fn set_headers(&mut self, headers: Vec<String>) -> Result<()> {
        if self.headers.is_some() {
            return Err(generic_error(&format!(
                "Headers of {} were already written",
                self.path.display()
            )));
        }

        self.writer
            .write_record(&headers)
            .map_err(|e| csv_error(e, self.path.clone()))?;
        self.headers = Some(headers);
        Ok(())
    }

    /// Writes one row, writing the header first if needed
    ///
    /// # Errors
    /// Fails when the row names a column that is not in the header
    pub fn print_row(&mut self, row: &[(String, String)]) -> Result<()> {
        if self.headers.is_none() {
            self.set_headers(row.iter().map(|(column, _)| column.clone()).collect())?;
        }
        let headers = self.headers.as_deref().unwrap_or_default();

        if let Some((column, _)) = row.iter().find(|(column, _)| !headers.contains(column)) {
            return Err(generic_error(&format!(
                "Column '{column}' is not part of the header of {}",
                self.path.display()
            )));
        }

        let record: Vec<&str> = headers
            .iter()
            .map(|header| {
                row.iter()
                    .find(|(column, _)| column == header)
                    .map(|(_, value)| value.as_str())
                    .unwrap_or("")
            })
            .collect();

        self.writer
            .write_record(&record)
            .map_err(|e| csv_error(e, self.path.clone()))?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes everything to disk
    pub fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| file_operation_error(e, self.path.clone(), "write"))?;
        debug!("Wrote {} rows to {}", self.rows, self.path.display());
        Ok(())
    }
}

/// Builds a [`CsvRow`] from anything displayable
pub fn csv_row<const N: usize>(cells: [(&str, String); N]) -> CsvRow {
    cells
        .into_iter()
        .map(|(column, value)| (column.to_string(), value))
        .collect()
}
