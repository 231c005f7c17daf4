//! Application
//!
//! Runs select → load → process strictly in sequence.

use log::{debug, info};

use crate::errors::Result;
use crate::files::{Container, FileSelector};

use super::stages::{DataLoader, DataProcessor};

/// Statistics about one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of data files selected
    pub files_selected: usize,
}

/// The three pipeline stages bound to one file container
pub struct Application<S, L, P> {
    container: Container,
    selector: S,
    loader: L,
    processor: P,
}

impl<S, L, P> Application<S, L, P>
where
    S: FileSelector,
    L: DataLoader,
    P: DataProcessor<Input = L::Output>,
{
    pub fn new(container: Container, selector: S, loader: L, processor: P) -> Self {
        Application {
            container,
            selector,
            loader,
            processor,
        }
    }

    /// Runs every stage in order
    ///
    /// # Errors
    /// The first failing stage stops the run and its error is returned
    /// unchanged; later stages do not run.
    pub fn run(&self) -> Result<RunSummary> {
        debug!("Running on {}", self.container.describe());

        info!("Selecting files...");
        let data_files = self.selector.select(&self.container)?;
        let summary = RunSummary {
            files_selected: data_files.len(),
        };
        debug!("Selected {} data files", summary.files_selected);

        info!("Loading data...");
        let data = self.loader.load(&data_files)?;

        info!("Processing...");
        self.processor.process(data)?;

        info!("Completed successfully!");
        Ok(summary)
    }
}
