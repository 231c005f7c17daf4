//! File selection
//!
//! Selectors decide which files of a container are data files.

use log::{debug, info};

use crate::constants::{BASIC_EXTENSION, NODES_EXTENSION, WILDCARD};
use crate::errors::Result;
use crate::logging::format_message;

use super::collection::{FileList, LabeledFileCollection, Selection};
use super::container::{FileContainer, compile_pattern};
use super::labeled::LabeledFileContainer;

/// Source of files handed to a selector
///
/// Whether labels are kept is decided here, by the caller.
#[derive(Debug)]
pub enum Container {
    Plain(Box<dyn FileContainer>),
    Labeled(LabeledFileContainer),
}

impl Container {
    pub fn describe(&self) -> String {
        match self {
            Container::Plain(container) => container.describe(),
            Container::Labeled(container) => container.describe(),
        }
    }
}

impl From<LabeledFileContainer> for Container {
    fn from(container: LabeledFileContainer) -> Self {
        Container::Labeled(container)
    }
}

/// Picks the data files out of a container
pub trait FileSelector {
    fn select(&self, container: &Container) -> Result<Selection>;
}

/// Selects only the files ending with a fixed extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFileSelector {
    extension: String,
    pattern: String,
}

impl ExtensionFileSelector {
    pub fn new(extension: &str) -> Self {
        ExtensionFileSelector {
            extension: extension.to_string(),
            pattern: format!("{WILDCARD}{extension}"),
        }
    }

    /// Selects `.basic.csv` files
    pub fn basic() -> Self {
        Self::new(BASIC_EXTENSION)
    }

    /// Selects `.nodes.csv` files
    pub fn nodes() -> Self {
        Self::new(NODES_EXTENSION)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl FileSelector for ExtensionFileSelector {
    fn select(&self, container: &Container) -> Result<Selection> {
        compile_pattern(&self.pattern)?;
        debug!(
            "Selecting '{}' files from {}",
            self.pattern,
            container.describe()
        );

        let selection = match container {
            Container::Plain(container) => {
                Selection::Flat(FileList::new(container.glob(&self.pattern)?))
            }
            Container::Labeled(container) => {
                let mut data_files = LabeledFileCollection::new();
                for (label, file) in container.glob_by_label(&self.pattern)? {
                    data_files.add(file, &label);
                }

                for label in container.labels() {
                    let message = format!(
                        "{label}: {} data files",
                        data_files.count_for(label)
                    );
                    let colored_message = format!(
                        "{}: {} data files",
                        colored::Colorize::bold(label.as_str()),
                        data_files.count_for(label)
                    );
                    info!("{}", format_message(&message, &colored_message));
                }

                Selection::Labeled(data_files)
            }
        };

        Ok(selection)
    }
}
