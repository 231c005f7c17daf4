//! File abstraction module
//!
//! Containers hold data files, selectors pick data files out of containers
//! and collections hold the picked files for the loaders.

mod collection;
mod container;
mod labeled;
mod selector;

pub use collection::{FileCollection, FileList, LabeledFileCollection, Selection};
pub use container::{Directory, EmptyDirectory, FileContainer, MultiDirectory};
pub use labeled::LabeledFileContainer;
pub use selector::{Container, ExtensionFileSelector, FileSelector};
