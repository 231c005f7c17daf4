//! File collections
//!
//! A collection is a group of files that has already been selected. Once
//! built it is never modified by the stages that read it.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::constants::DEFAULT_LABEL;
use crate::labels::{ByLabel, Label};

/// An already-resolved group of files
pub trait FileCollection {
    /// Every file in the collection, in collection order
    fn files(&self) -> Vec<&Path>;

    fn len(&self) -> usize {
        self.files().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A simple list of files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileList {
    files: Vec<PathBuf>,
}

impl FileList {
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        FileList {
            files: files.into_iter().collect(),
        }
    }
}

impl FileCollection for FileList {
    fn files(&self) -> Vec<&Path> {
        self.files.iter().map(PathBuf::as_path).collect()
    }

    fn len(&self) -> usize {
        self.files.len()
    }
}

/// Files grouped by the label of the dataset they belong to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledFileCollection {
    files: ByLabel<PathBuf>,
}

impl LabeledFileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `file` under `label`
    pub fn add(&mut self, file: PathBuf, label: &Label) {
        self.files.push(label, file);
    }

    /// Files with the given label, in insertion order
    pub fn get(&self, label: &Label) -> &[PathBuf] {
        self.files.get(label)
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.files.labels()
    }

    /// Each file together with its label
    pub fn iter_by_label(&self) -> impl Iterator<Item = (&Label, &Path)> {
        self.files
            .iter_flat()
            .map(|(label, path)| (label, path.as_path()))
    }

    /// Total number of files across all labels
    pub fn count(&self) -> usize {
        self.files.value_count()
    }

    pub fn count_for(&self, label: &Label) -> usize {
        self.files.get(label).len()
    }
}

impl FileCollection for LabeledFileCollection {
    fn files(&self) -> Vec<&Path> {
        self.iter_by_label().map(|(_, path)| path).collect()
    }

    fn len(&self) -> usize {
        self.count()
    }
}

static UNLABELED: Lazy<Label> = Lazy::new(|| Label::from(DEFAULT_LABEL));

/// Output of a selector
///
/// The shape is decided by the caller through the container it passes in,
/// never guessed from the values themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Flat(FileList),
    Labeled(LabeledFileCollection),
}

impl Selection {
    /// Each selected file with its label; flat selections use the label
    /// `data` for every file
    pub fn iter_by_label(&self) -> Box<dyn Iterator<Item = (&Label, &Path)> + '_> {
        match self {
            Selection::Flat(list) => Box::new(
                list.files
                    .iter()
                    .map(|path| (&*UNLABELED, path.as_path())),
            ),
            Selection::Labeled(collection) => Box::new(collection.iter_by_label()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Flat(list) => list.len(),
            Selection::Labeled(collection) => collection.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_collection_partitions_by_label() {
        let a = Label::from("A");
        let b = Label::from("B");
        let mut collection = LabeledFileCollection::new();
        collection.add(PathBuf::from("/a/1.basic.csv"), &a);
        collection.add(PathBuf::from("/b/1.basic.csv"), &b);
        collection.add(PathBuf::from("/a/2.basic.csv"), &a);

        assert_eq!(collection.count(), 3);
        assert_eq!(collection.count_for(&a), 2);
        assert_eq!(
            collection.get(&a),
            &[PathBuf::from("/a/1.basic.csv"), PathBuf::from("/a/2.basic.csv")]
        );
        assert!(collection.get(&Label::from("C")).is_empty());
        assert_eq!(collection.labels(), vec![&a, &b]);
    }

    #[test]
    fn test_flat_selection_uses_default_label() {
        let selection = Selection::Flat(FileList::new(vec![
            PathBuf::from("/x/1.basic.csv"),
            PathBuf::from("/x/2.basic.csv"),
        ]));

        let labels: Vec<&str> = selection
            .iter_by_label()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels, vec![DEFAULT_LABEL, DEFAULT_LABEL]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_collection_files_follow_label_order() {
        let mut collection = LabeledFileCollection::new();
        collection.add(PathBuf::from("/b/1"), &Label::from("B"));
        collection.add(PathBuf::from("/a/1"), &Label::from("A"));
        collection.add(PathBuf::from("/b/2"), &Label::from("B"));

        let files: Vec<&Path> = collection.files();
        assert_eq!(
            files,
            vec![Path::new("/b/1"), Path::new("/b/2"), Path::new("/a/1")]
        );
        assert!(!Selection::Labeled(collection).is_empty());
    }
}
