use ssbgp_data_tools::files::{
    Container, Directory, EmptyDirectory, ExtensionFileSelector, FileContainer, FileSelector,
    LabeledFileContainer, MultiDirectory, Selection,
};
use ssbgp_data_tools::labels::Label;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            File::create(dir.join(name)).unwrap();
        }
    }

    fn data_dir(names: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        touch(dir.path(), names);
        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_glob_matches_only_pattern() {
        let dir = data_dir(&["2.basic.csv", "1.basic.csv", "1.nodes.csv", "notes.txt"]);
        fs::create_dir(dir.path().join("sub.basic.csv")).unwrap();

        let matched = Directory::new(dir.path()).glob("*.basic.csv").unwrap();

        // Directories whose name matches are entries too
        let mut matched = names(&matched);
        matched.sort();
        assert_eq!(matched, vec!["1.basic.csv", "2.basic.csv", "sub.basic.csv"]);
    }

    #[test]
    fn test_labeled_iteration_is_union_of_parts() {
        let a = data_dir(&["1.basic.csv", "2.basic.csv"]);
        let b = data_dir(&["1.basic.csv"]);
        let container = LabeledFileContainer::new()
            .with("A", Box::new(Directory::new(a.path())))
            .with("B", Box::new(Directory::new(b.path())))
            .with("C", Box::new(EmptyDirectory));

        let entries = container.iterate_by_label().unwrap();

        let expected = Directory::new(a.path()).iterate().unwrap().len()
            + Directory::new(b.path()).iterate().unwrap().len();
        assert_eq!(entries.len(), expected);
        for (label, path) in &entries {
            let parent = if label == &Label::from("A") { a.path() } else { b.path() };
            assert_eq!(path.parent().unwrap(), parent);
        }
    }

    #[test]
    fn test_selector_keeps_labels_for_labeled_containers() {
        let a = data_dir(&["1.basic.csv", "1.nodes.csv"]);
        let b = data_dir(&["1.basic.csv", "2.basic.csv"]);
        let container = LabeledFileContainer::new()
            .with("A", Box::new(Directory::new(a.path())))
            .with("B", Box::new(Directory::new(b.path())));

        let selection = ExtensionFileSelector::basic()
            .select(&Container::from(container))
            .unwrap();

        match selection {
            Selection::Labeled(collection) => {
                assert_eq!(collection.count(), 3);
                assert_eq!(collection.count_for(&Label::from("A")), 1);
                assert_eq!(collection.count_for(&Label::from("B")), 2);
            }
            other => panic!("Expected a labeled selection, got {other:?}"),
        }
    }

    #[test]
    fn test_selector_is_flat_for_plain_containers() {
        let a = data_dir(&["1.basic.csv"]);
        let b = data_dir(&["1.basic.csv", "1.nodes.csv"]);
        let container =
            MultiDirectory::new(vec![Directory::new(a.path()), Directory::new(b.path())]);

        let selection = ExtensionFileSelector::basic()
            .select(&Container::Plain(Box::new(container)))
            .unwrap();

        assert!(matches!(selection, Selection::Flat(_)));
        assert_eq!(selection.len(), 2);
        for (label, _) in selection.iter_by_label() {
            assert_eq!(label.as_str(), "data");
        }
    }

    #[test]
    fn test_nodes_selector() {
        let dir = data_dir(&["1.basic.csv", "1.nodes.csv"]);

        let selection = ExtensionFileSelector::nodes()
            .select(&Container::Plain(Box::new(Directory::new(dir.path()))))
            .unwrap();

        let selected: Vec<PathBuf> = selection
            .iter_by_label()
            .map(|(_, path)| path.to_path_buf())
            .collect();
        assert_eq!(names(&selected), vec!["1.nodes.csv"]);
    }
}
