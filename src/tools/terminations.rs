//! Termination counting

use colored::Colorize;

use crate::errors::Result;
use crate::files::Selection;
use crate::labels::{ByLabel, Label};
use crate::logging::format_message;
use crate::pipeline::{DataLoader, DataProcessor};
use crate::records::{DataFile, TerminationCounts};
use crate::stats::mean;

/// One `TerminationCounts` per data file
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminationsLoader;

impl DataLoader for TerminationsLoader {
    type Output = ByLabel<TerminationCounts>;

    fn load(&self, data_files: &Selection) -> Result<Self::Output> {
        let mut counts = ByLabel::new();

        for (label, path) in data_files.iter_by_label() {
            let mut destination = TerminationCounts::new();
            DataFile::open(path)?.for_each_row(|row| {
                destination.record_sample(row.terminated()?);
                Ok(())
            })?;
            counts.push(label, destination);
        }

        Ok(counts)
    }
}

/// Termination summary of one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct TerminationSummary {
    pub label: Label,
    pub avg_sample_count: f64,
    pub destination_count: usize,
    pub terminated_count: usize,
    pub non_terminated_count: usize,
}

impl TerminationSummary {
    pub fn from_destinations(label: &Label, destinations: &[TerminationCounts]) -> Self {
        let terminated_count = destinations
            .iter()
            .filter(|destination| destination.all_terminated())
            .count();

        TerminationSummary {
            label: label.clone(),
            avg_sample_count: mean(
                destinations
                    .iter()
                    .map(|destination| destination.sample_count as f64),
            ),
            destination_count: destinations.len(),
            terminated_count,
            non_terminated_count: destinations.len() - terminated_count,
        }
    }

    /// Console form: the label followed by one indented line per count
    pub fn render(&self) -> String {
        let heading = format_message(
            self.label.as_str(),
            &self.label.as_str().bold().to_string(),
        );

        format!(
            "{heading}\n  Avg. sample count: {:?}\n  Destination count: {}\n  Terminated count: {}\n  Non-terminated count: {}\n",
            self.avg_sample_count,
            self.destination_count,
            self.terminated_count,
            self.non_terminated_count
        )
    }
}

/// Prints a termination summary per dataset
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminationsProcessor;

impl DataProcessor for TerminationsProcessor {
    type Input = ByLabel<TerminationCounts>;

    fn process(&self, data: Self::Input) -> Result<()> {
        for (label, destinations) in data.iter() {
            println!(
                "{}",
                TerminationSummary::from_destinations(label, destinations).render()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{
        Container, Directory, ExtensionFileSelector, FileSelector, LabeledFileContainer,
    };
    use std::fs;
    use tempfile::tempdir;

    fn counts(flags: &[bool]) -> TerminationCounts {
        let mut destination = TerminationCounts::new();
        for &flag in flags {
            destination.record_sample(flag);
        }
        destination
    }

    #[test]
    fn test_loader_counts_samples_per_file() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join("1.basic.csv"),
            "Seed;Terminated\n1;Yes\n2;No\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("2.basic.csv"), "Seed;Terminated\n1;Yes\n").unwrap();

        let container =
            LabeledFileContainer::new().with("A", Box::new(Directory::new(temp_dir.path())));
        let selection = ExtensionFileSelector::basic()
            .select(&Container::from(container))
            .unwrap();

        let loaded = TerminationsLoader.load(&selection).unwrap();
        let destinations = loaded.get(&Label::from("A"));

        assert_eq!(destinations, &[counts(&[true, false]), counts(&[true])]);
    }

    #[test]
    fn test_destination_terminates_only_when_every_sample_does() {
        let summary = TerminationSummary::from_destinations(
            &Label::from("A"),
            &[counts(&[true, true]), counts(&[true, false]), counts(&[false])],
        );

        assert_eq!(summary.destination_count, 3);
        assert_eq!(summary.terminated_count, 1);
        assert_eq!(summary.non_terminated_count, 2);
        assert!((summary.avg_sample_count - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_render_lists_every_count() {
        let summary = TerminationSummary::from_destinations(
            &Label::from("A"),
            &[counts(&[true, true]), counts(&[false, false])],
        );

        let rendered = summary.render();
        assert!(rendered.contains("  Avg. sample count: 2.0\n"));
        assert!(rendered.contains("  Destination count: 2\n"));
        assert!(rendered.contains("  Terminated count: 1\n"));
        assert!(rendered.contains("  Non-terminated count: 1\n"));
    }

    #[test]
    fn test_render_keeps_fractional_average() {
        let summary = TerminationSummary::from_destinations(
            &Label::from("A"),
            &[counts(&[true]), counts(&[true, false])],
        );

        assert!(summary.render().contains("  Avg. sample count: 1.5\n"));
    }
}
