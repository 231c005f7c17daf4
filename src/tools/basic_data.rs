//! Basic data report
//!
//! One CSV row per dataset with sample, destination and termination counts
//! plus the averages of the terminated samples.

use std::path::{Path, PathBuf};

use log::info;

use crate::constants::{
    COLUMN_DETECTION_COUNT, COLUMN_MESSAGE_COUNT, COLUMN_TOTAL_TIME, REPORT_AVG_DEACTIVATIONS,
    REPORT_AVG_MESSAGES, REPORT_AVG_TIME, REPORT_DATASET, REPORT_DESTINATIONS,
    REPORT_NON_TERMINATED, REPORT_SAMPLES, REPORT_TERMINATED,
};
use crate::errors::Result;
use crate::files::Selection;
use crate::labels::{ByLabel, Label};
use crate::pipeline::{DataLoader, DataProcessor};
use crate::records::{DataFile, DestinationData, SampleMetrics};
use crate::report::{CsvPrinter, CsvRow, csv_row};
use crate::stats::mean;

/// One `DestinationData` per data file
///
/// Metric columns are only read for samples that terminated.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDataLoader;

impl DataLoader for BasicDataLoader {
    type Output = ByLabel<DestinationData>;

    fn load(&self, data_files: &Selection) -> Result<Self::Output> {
        let mut data = ByLabel::new();

        for (label, path) in data_files.iter_by_label() {
            let mut destination = DestinationData::new();
            DataFile::open(path)?.for_each_row(|row| {
                let metrics = if row.terminated()? {
                    Some(SampleMetrics {
                        termination_time: row.parse(COLUMN_TOTAL_TIME)?,
                        messages: row.parse(COLUMN_MESSAGE_COUNT)?,
                        deactivations: row.parse(COLUMN_DETECTION_COUNT)?,
                    })
                } else {
                    None
                };
                destination.record_sample(metrics);
                Ok(())
            })?;
            data.push(label, destination);
        }

        Ok(data)
    }
}

/// Report row of one dataset
///
/// Averages pool every terminated sample of the dataset; a dataset without
/// terminated samples has `NaN` averages.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicDataSummary {
    pub label: Label,
    pub samples: usize,
    pub destinations: usize,
    pub terminated: usize,
    pub non_terminated: usize,
    pub avg_termination_time: f64,
    pub avg_messages: f64,
    pub avg_deactivations: f64,
}

impl BasicDataSummary {
    pub fn from_destinations(label: &Label, destinations: &[DestinationData]) -> Self {
        let terminated = destinations
            .iter()
            .filter(|destination| destination.all_terminated())
            .count();

        let pooled = |values: fn(&DestinationData) -> &[u64]| {
            mean(
                destinations
                    .iter()
                    .flat_map(|destination| values(destination).iter().map(|&v| v as f64)),
            )
        };

        BasicDataSummary {
            label: label.clone(),
            samples: destinations
                .iter()
                .map(DestinationData::sample_count)
                .sum(),
            destinations: destinations.len(),
            terminated,
            non_terminated: destinations.len() - terminated,
            avg_termination_time: pooled(DestinationData::termination_times),
            avg_messages: pooled(DestinationData::messages),
            avg_deactivations: pooled(DestinationData::deactivations),
        }
    }

    pub fn to_row(&self) -> CsvRow {
        csv_row([
            (REPORT_DATASET, self.label.to_string()),
            (REPORT_SAMPLES, self.samples.to_string()),
            (REPORT_DESTINATIONS, self.destinations.to_string()),
            (REPORT_TERMINATED, self.terminated.to_string()),
            (REPORT_NON_TERMINATED, self.non_terminated.to_string()),
            (REPORT_AVG_TIME, self.avg_termination_time.to_string()),
            (REPORT_AVG_MESSAGES, self.avg_messages.to_string()),
            (REPORT_AVG_DEACTIVATIONS, self.avg_deactivations.to_string()),
        ])
    }
}

/// Writes the basic data report to a CSV file
#[derive(Debug, Clone)]
pub struct BasicDataProcessor {
    output: PathBuf,
}

impl BasicDataProcessor {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        BasicDataProcessor {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl DataProcessor for BasicDataProcessor {
    type Input = ByLabel<DestinationData>;

    fn process(&self, data: Self::Input) -> Result<()> {
        let mut printer = CsvPrinter::create(&self.output)?;

        for (label, destinations) in data.iter() {
            let summary = BasicDataSummary::from_destinations(label, destinations);
            printer.print_row(&summary.to_row())?;
        }

        printer.finish()?;
        info!("Basic data written to {}", self.output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::files::{
        Container, Directory, ExtensionFileSelector, FileSelector, LabeledFileContainer,
    };
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str =
        "Seed;Terminated;Termination Time (Total);Message Count;Detection Count\n";

    fn write_file(dir: &Path, name: &str, rows: &str) {
        fs::write(dir.join(name), format!("{HEADER}{rows}")).unwrap();
    }

    fn selection(dir: &Path) -> Selection {
        let container = LabeledFileContainer::new().with("A", Box::new(Directory::new(dir)));
        ExtensionFileSelector::basic()
            .select(&Container::from(container))
            .unwrap()
    }

    #[test]
    fn test_loader_records_metrics_of_terminated_samples() {
        let temp_dir = tempdir().unwrap();
        write_file(temp_dir.path(), "1.basic.csv", "1;Yes;100;10;1\n2;No;;;\n");

        let data = BasicDataLoader.load(&selection(temp_dir.path())).unwrap();
        let destinations = data.get(&Label::from("A"));

        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations[0].sample_count(), 2);
        assert_eq!(destinations[0].terminations(), &[true, false]);
        assert_eq!(destinations[0].termination_times(), &[100]);
        assert_eq!(destinations[0].messages(), &[10]);
        assert_eq!(destinations[0].deactivations(), &[1]);
    }

    #[test]
    fn test_loader_rejects_bad_metric_of_terminated_sample() {
        let temp_dir = tempdir().unwrap();
        write_file(temp_dir.path(), "1.basic.csv", "1;Yes;100;many;1\n");

        match BasicDataLoader.load(&selection(temp_dir.path())) {
            Err(Error::MalformedRecord { row, column, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, COLUMN_MESSAGE_COUNT);
            }
            other => panic!("Expected a malformed record, got {other:?}"),
        }
    }

    fn destination(samples: &[Option<(u64, u64, u64)>]) -> DestinationData {
        let mut destination = DestinationData::new();
        for sample in samples {
            destination.record_sample(sample.map(|(time, messages, deactivations)| {
                SampleMetrics {
                    termination_time: time,
                    messages,
                    deactivations,
                }
            }));
        }
        destination
    }

    #[test]
    fn test_summary_pools_terminated_samples() {
        let summary = BasicDataSummary::from_destinations(
            &Label::from("A"),
            &[
                destination(&[Some((100, 10, 0)), Some((300, 30, 2))]),
                destination(&[Some((200, 20, 1)), None]),
            ],
        );

        assert_eq!(summary.samples, 4);
        assert_eq!(summary.destinations, 2);
        assert_eq!(summary.terminated, 1);
        assert_eq!(summary.non_terminated, 1);
        assert_eq!(summary.avg_termination_time, 200.0);
        assert_eq!(summary.avg_messages, 20.0);
        assert_eq!(summary.avg_deactivations, 1.0);
    }

    #[test]
    fn test_summary_without_terminated_samples_is_nan() {
        let summary =
            BasicDataSummary::from_destinations(&Label::from("B"), &[destination(&[None])]);

        assert_eq!(summary.terminated, 0);
        assert_eq!(summary.non_terminated, 1);
        assert!(summary.avg_termination_time.is_nan());

        let row = summary.to_row();
        assert_eq!(
            row.iter().find(|(column, _)| column == REPORT_AVG_TIME),
            Some(&(REPORT_AVG_TIME.to_string(), "NaN".to_string()))
        );
    }

    #[test]
    fn test_processor_writes_one_row_per_label() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("basic-data.csv");

        let mut data = ByLabel::new();
        data.push(&Label::from("A"), destination(&[Some((100, 4, 0))]));
        data.push(&Label::from("A"), destination(&[Some((200, 6, 2))]));
        data.push(&Label::from("B"), destination(&[None]));

        BasicDataProcessor::new(&output).process(data).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(
            content,
            "Dataset,Samples,Destinations,Terminated,Non-Terminated,Termination Times (Avg.),Messages (Avg.),Deactivations (Avg.)\n\
             A,2,2,2,0,150,5,1\n\
             B,1,1,0,1,NaN,NaN,NaN\n"
        );
    }
}
