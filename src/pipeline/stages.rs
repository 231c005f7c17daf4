//! Pipeline stages
//!
//! The selection stage lives in [`crate::files`]; this module defines the two
//! stages that follow it.

use crate::errors::Result;
use crate::files::Selection;

/// Loads the data files of a selection into memory
///
/// Loaders read every selected file completely before returning, so memory
/// use grows with the number of files named by the configuration. Loaders
/// never modify the selection.
pub trait DataLoader {
    type Output;

    fn load(&self, data_files: &Selection) -> Result<Self::Output>;
}

/// Consumes loaded data and produces the tool's output
pub trait DataProcessor {
    type Input;

    fn process(&self, data: Self::Input) -> Result<()>;
}
