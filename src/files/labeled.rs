//! Labeled file container
//!
//! Aggregates several containers, one per dataset, and keeps track of which
//! label each file came from.

use std::path::PathBuf;

use crate::errors::Result;
use crate::labels::Label;

use super::container::FileContainer;

/// Container made of one sub-container per label
///
/// Labels are visited in the order they were inserted; no other ordering
/// across labels is promised.
#[derive(Debug, Default)]
pub struct LabeledFileContainer {
    containers: Vec<(Label, Box<dyn FileContainer>)>,
}

impl LabeledFileContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a container under `label`, replacing any container already
    /// registered for that label
    pub fn insert(&mut self, label: impl Into<Label>, container: Box<dyn FileContainer>) {
        let label = label.into();
        match self.containers.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = container,
            None => self.containers.push((label, container)),
        }
    }

    /// Builder-style variant of [`LabeledFileContainer::insert`]
    pub fn with(mut self, label: impl Into<Label>, container: Box<dyn FileContainer>) -> Self {
        self.insert(label, container);
        self
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.containers.iter().map(|(label, _)| label).collect()
    }

    pub fn get(&self, label: &Label) -> Option<&dyn FileContainer> {
        self.containers
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, container)| container.as_ref())
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Every entry of every sub-container, tagged with its label
    pub fn iterate_by_label(&self) -> Result<Vec<(Label, PathBuf)>> {
        let mut entries = Vec::new();
        for (label, container) in &self.containers {
            entries.extend(
                container
                    .iterate()?
                    .into_iter()
                    .map(|path| (label.clone(), path)),
            );
        }
        Ok(entries)
    }

    /// Every entry matching `pattern` in every sub-container, tagged with
    /// its label
    pub fn glob_by_label(&self, pattern: &str) -> Result<Vec<(Label, PathBuf)>> {
        let mut entries = Vec::new();
        for (label, container) in &self.containers {
            entries.extend(
                container
                    .glob(pattern)?
                    .into_iter()
                    .map(|path| (label.clone(), path)),
            );
        }
        Ok(entries)
    }
}

impl FileContainer for LabeledFileContainer {
    fn iterate(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .iterate_by_label()?
            .into_iter()
            .map(|(_, path)| path)
            .collect())
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .glob_by_label(pattern)?
            .into_iter()
            .map(|(_, path)| path)
            .collect())
    }

    fn describe(&self) -> String {
        self.containers
            .iter()
            .map(|(label, container)| format!("{label}: {}", container.describe()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::container::{Directory, EmptyDirectory};
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_glob_by_label_tags_each_file() {
        let a_dir = tempdir().unwrap();
        let b_dir = tempdir().unwrap();
        File::create(a_dir.path().join("1.basic.csv")).unwrap();
        File::create(a_dir.path().join("2.basic.csv")).unwrap();
        File::create(b_dir.path().join("1.basic.csv")).unwrap();
        File::create(b_dir.path().join("1.nodes.csv")).unwrap();

        let container = LabeledFileContainer::new()
            .with("A", Box::new(Directory::new(a_dir.path())))
            .with("B", Box::new(Directory::new(b_dir.path())));

        let entries = container.glob_by_label("*.basic.csv").unwrap();
        let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["A", "A", "B"]);
        assert!(entries[2].1.starts_with(b_dir.path()));
    }

    #[test]
    fn test_iterate_by_label_count_is_sum_of_parts() {
        let a_dir = tempdir().unwrap();
        let b_dir = tempdir().unwrap();
        for name in ["x", "y", "z"] {
            File::create(a_dir.path().join(name)).unwrap();
        }
        File::create(b_dir.path().join("w")).unwrap();

        let a = Directory::new(a_dir.path());
        let b = Directory::new(b_dir.path());
        let expected = a.iterate().unwrap().len() + b.iterate().unwrap().len();

        let container = LabeledFileContainer::new()
            .with("A", Box::new(a))
            .with("B", Box::new(b))
            .with("C", Box::new(EmptyDirectory));

        assert_eq!(container.iterate_by_label().unwrap().len(), expected);
        assert_eq!(container.iterate().unwrap().len(), expected);
        assert_eq!(container.len(), 3);
    }

    #[test]
    fn test_insert_replaces_existing_label() {
        let mut container = LabeledFileContainer::new();
        container.insert("A", Box::new(Directory::new("/nowhere")));
        container.insert("A", Box::new(EmptyDirectory));

        assert_eq!(container.len(), 1);
        assert!(container.glob("*").unwrap().is_empty());
        assert_eq!(
            container.get(&Label::from("A")).map(|c| c.describe()),
            Some("<empty>".to_string())
        );
    }
}
