//! Reader for the simulator's data files
//!
//! Data files are `;`-delimited CSV files with a header row. Each row is one
//! sample (seed) of a single destination.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use log::trace;

use crate::constants::{COLUMN_TERMINATED, DATA_DELIMITER, TERMINATED_YES};
use crate::errors::{Result, csv_error, file_operation_error, malformed_record_error};

/// An open data file
pub struct DataFile {
    path: PathBuf,
    headers: StringRecord,
    reader: Reader<File>,
}

impl DataFile {
    /// Opens `path` and reads its header row
    ///
    /// # Errors
    /// Fails when the file cannot be opened or the header row cannot be read
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| file_operation_error(e, path.to_path_buf(), "open"))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(DATA_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(e, path.to_path_buf()))?
            .clone();

        Ok(DataFile {
            path: path.to_path_buf(),
            headers,
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Visits every data row in file order, stopping at the first error
    ///
    /// Returns the number of rows visited.
    pub fn for_each_row<F>(mut self, mut visit: F) -> Result<usize>
    where
        F: FnMut(&Row<'_>) -> Result<()>,
    {
        let mut record = StringRecord::new();
        let mut index = 0;

        while self
            .reader
            .read_record(&mut record)
            .map_err(|e| csv_error(e, self.path.clone()))?
        {
            let row = Row {
                file: &self.path,
                headers: &self.headers,
                record: &record,
                index,
            };
            visit(&row)?;
            index += 1;
        }

        trace!("Read {index} rows from {}", self.path.display());

        Ok(index)
    }
}

/// One data row, with access to its fields by column name
#[derive(Debug)]
pub struct Row<'a> {
    file: &'a Path,
    headers: &'a StringRecord,
    record: &'a StringRecord,
    index: usize,
}

impl Row<'_> {
    /// Index of the row, starting at 0 for the first row after the header
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw value of `column`
    ///
    /// # Errors
    /// Fails with a malformed record error when the header has no such
    /// column or the row is too short to hold it
    pub fn field(&self, column: &str) -> Result<&str> {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|position| self.record.get(position))
            .ok_or_else(|| self.malformed(column))
    }

    /// Value of `column` parsed as `T`
    pub fn parse<T: FromStr>(&self, column: &str) -> Result<T> {
        self.field(column)?
            .parse::<T>()
            .map_err(|_| self.malformed(column))
    }

    /// Value of `column` parsed as a finite float
    pub fn parse_finite(&self, column: &str) -> Result<f64> {
        let value: f64 = self.parse(column)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.malformed(column))
        }
    }

    /// Whether the sample terminated: only `Yes` counts as terminated
    pub fn terminated(&self) -> Result<bool> {
        Ok(self.field(COLUMN_TERMINATED)? == TERMINATED_YES)
    }

    fn malformed(&self, column: &str) -> crate::errors::Error {
        malformed_record_error(self.file.to_path_buf(), self.index, column)
    }
}
