//! Subcommand dispatch
//!
//! Turns the parsed command line into a configured [`Application`] and runs
//! it. Every configuration and directory check happens here, before the
//! first data file is read.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::ArgMatches;

use crate::cli::{
    AVG_TIMES, BASIC_DATA, COUNT_TERMINATIONS, INV_CUMSUM, MAX_TOTAL_TIMES, PLOT_TIMES,
    TOTAL_TIMES,
};
use crate::config::{DataSetConfig, load_config};
use crate::errors::{Result, generic_error};
use crate::files::{Container, ExtensionFileSelector};
use crate::labels::{ByLabel, Protocol};
use crate::pipeline::{Application, DataLoader, DataProcessor, RunSummary};
use crate::report::{ConsoleTraceSink, Plotter, TraceSink, TraceTablePrinter};
use crate::tools::{
    AvgTimesLoader, BasicDataLoader, BasicDataProcessor, CcdfProcessor, MaxTotalTimesLoader,
    TerminationsLoader, TerminationsProcessor, TotalTimesLoader,
};

/// Runs the subcommand named on the command line
///
/// # Errors
/// Returns the first error raised while configuring or running the tool
pub fn run_command(matches: &ArgMatches) -> Result<RunSummary> {
    match matches.subcommand() {
        Some((BASIC_DATA, sub)) => basic_data(sub),
        Some((COUNT_TERMINATIONS, sub)) => count_terminations(sub),
        Some((INV_CUMSUM, sub)) => inv_cumsum(sub),
        Some((PLOT_TIMES, sub)) => plot_times(sub),
        Some((TOTAL_TIMES, sub)) => {
            let print_results = sub.get_flag("print_results");
            protocol_times(sub, TotalTimesLoader, print_results)
        }
        Some((AVG_TIMES, sub)) => protocol_times(sub, AvgTimesLoader, true),
        Some((MAX_TOTAL_TIMES, sub)) => {
            let print_results = sub.get_flag("print_results");
            protocol_times(sub, MaxTotalTimesLoader, print_results)
        }
        Some((name, _)) => Err(generic_error(&format!("Unknown command: {name}"))),
        None => Err(generic_error("No command given")),
    }
}

fn basic_data(matches: &ArgMatches) -> Result<RunSummary> {
    let config = load_config(&conf_file(matches)?)?;
    let container = config.check_directories(matches.get_flag("ignore_non_existing"))?;
    let output = with_suffix(out(matches)?, "csv");

    run(
        container.into(),
        BasicDataLoader,
        BasicDataProcessor::new(output),
    )
}

fn count_terminations(matches: &ArgMatches) -> Result<RunSummary> {
    let config = load_config(&conf_file(matches)?)?;
    let container = config.check_directories(matches.get_flag("ignore_non_existing"))?;

    run(container.into(), TerminationsLoader, TerminationsProcessor)
}

fn inv_cumsum(matches: &ArgMatches) -> Result<RunSummary> {
    let config = load_config(&conf_file(matches)?)?;
    let container = config.check_directories(false)?;
    let trace_lines = config.trace_lines()?;
    let out = out(matches)?;

    let processor = CcdfProcessor::new(vec![
        Box::new(Plotter::new(trace_lines, with_suffix(out, "html"))),
        Box::new(TraceTablePrinter::new(with_suffix(out, "csv"))),
    ]);

    run(container.into(), MaxTotalTimesLoader, processor)
}

fn plot_times(matches: &ArgMatches) -> Result<RunSummary> {
    let config = match matches.get_many::<String>("traces") {
        Some(pairs) => DataSetConfig::from_trace_pairs(&pairs.collect::<Vec<_>>())?,
        None => {
            let file = matches
                .get_one::<String>("file")
                .ok_or_else(|| generic_error("Either --traces or --file is required"))?;
            load_config(&PathBuf::from(file))?
        }
    };
    let container = config.check_directories(false)?;
    let plotter = Plotter::new(config.trace_lines()?, PathBuf::from(out(matches)?));

    run(
        container.into(),
        MaxTotalTimesLoader,
        CcdfProcessor::new(vec![Box::new(plotter)]),
    )
}

/// Shared body of the tools that take one directory flag per protocol
fn protocol_times<L>(matches: &ArgMatches, loader: L, print_results: bool) -> Result<RunSummary>
where
    L: DataLoader<Output = ByLabel<f64>>,
{
    let directories = Protocol::ALL
        .iter()
        .map(|protocol| (*protocol, matches.get_one::<String>(protocol.flag()).cloned()))
        .collect();
    let config = DataSetConfig::from_protocols(directories)?;
    let container = config.check_directories(false)?;

    let mut sinks: Vec<Box<dyn TraceSink>> = vec![Box::new(Plotter::new(
        HashMap::new(),
        PathBuf::from(out(matches)?),
    ))];
    if print_results {
        sinks.push(Box::new(ConsoleTraceSink));
    }

    run(container.into(), loader, CcdfProcessor::new(sinks))
}

fn run<L, P>(container: Container, loader: L, processor: P) -> Result<RunSummary>
where
    L: DataLoader,
    P: DataProcessor<Input = L::Output>,
{
    Application::new(container, ExtensionFileSelector::basic(), loader, processor).run()
}

fn conf_file(matches: &ArgMatches) -> Result<PathBuf> {
    matches
        .get_one::<String>("conf_file")
        .map(PathBuf::from)
        .ok_or_else(|| generic_error("Configuration file argument not found"))
}

fn out(matches: &ArgMatches) -> Result<&str> {
    matches
        .get_one::<String>("out")
        .map(String::as_str)
        .ok_or_else(|| generic_error("Output argument not found"))
}

/// Appends `.suffix` to `out`, keeping any extension it already has
fn with_suffix(out: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{out}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;
    use crate::errors::Error;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["ssbgp-tools"];
        argv.extend_from_slice(args);
        build_cli().try_get_matches_from(argv).unwrap()
    }

    fn write_data(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_with_suffix_appends() {
        assert_eq!(with_suffix("out", "csv"), PathBuf::from("out.csv"));
        assert_eq!(with_suffix("out.v1", "html"), PathBuf::from("out.v1.html"));
    }

    #[test]
    fn test_basic_data_fails_before_reading_on_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let conf = temp_dir.path().join("conf.json");
        let out = temp_dir.path().join("report");
        fs::write(&conf, r#"{"A": "/this/directory/does/not/exist"}"#).unwrap();

        let result = run_command(&matches(&[
            "basic-data",
            conf.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]));

        assert!(matches!(result, Err(Error::MissingDataDirectory { .. })));
        assert!(!temp_dir.path().join("report.csv").exists());
    }

    #[test]
    fn test_inv_cumsum_writes_chart_and_table() {
        let temp_dir = tempdir().unwrap();
        let data = temp_dir.path().join("a");
        fs::create_dir(&data).unwrap();
        write_data(
            &data,
            "1.basic.csv",
            "Terminated;Termination Time (Total)\nYes;150\nYes;50\n",
        );
        let conf = temp_dir.path().join("conf.json");
        fs::write(
            &conf,
            format!(
                r#"{{"A": {{"data": "{}", "line": {{"color": "red", "dash": "dot"}}}}}}"#,
                data.display()
            ),
        )
        .unwrap();
        let out = temp_dir.path().join("ccdf");

        let summary = run_command(&matches(&[
            "inv-cumsum",
            conf.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(summary.files_selected, 1);
        let html = fs::read_to_string(temp_dir.path().join("ccdf.html")).unwrap();
        assert!(html.contains("<svg"));
        let table = fs::read_to_string(temp_dir.path().join("ccdf.csv")).unwrap();
        assert!(table.starts_with("Bins (x),A\n0,1\n100,0\n200,0\n"));
    }

    #[test]
    fn test_plot_times_rejects_invalid_trace() {
        let result = run_command(&matches(&["plot-times", "--traces", "no-separator"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_protocol_tool_fails_on_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = run_command(&matches(&["total-times", "--bgp", missing.to_str().unwrap()]));

        match result {
            Err(Error::MissingDataDirectory { path }) => assert_eq!(path, missing),
            other => panic!("Expected a missing data directory error, got {other:?}"),
        }
    }

    #[test]
    fn test_protocol_tool_plots_given_protocols() {
        let temp_dir = tempdir().unwrap();
        let data = temp_dir.path().join("ssbgp");
        fs::create_dir(&data).unwrap();
        write_data(
            &data,
            "1.basic.csv",
            "Terminated;Termination Time (Total)\nYes;100\n",
        );
        let out = temp_dir.path().join("times.html");

        let summary = run_command(&matches(&[
            "max-total-times",
            "--ssbgp",
            data.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(summary.files_selected, 1);
        assert!(out.exists());
    }
}
