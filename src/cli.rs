use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, command, crate_authors};

use crate::constants::{
    AVG_TIMES_ABOUT, BASIC_DATA_ABOUT, BGP_HELP, CONF_FILE_HELP, COUNT_TERMINATIONS_ABOUT,
    DEFAULT_BASIC_DATA_OUT, DEFAULT_INV_CUMSUM_OUT, DEFAULT_LEGACY_PLOT_OUT, DEFAULT_PLOT_OUT,
    IGNORE_NON_EXISTING_HELP, INV_CUMSUM_ABOUT, LOG_FILE_HELP, LOG_LEVEL_HELP,
    MAX_TOTAL_TIMES_ABOUT, OUT_HELP, PLOT_TIMES_ABOUT, PRINT_RESULTS_HELP, SSBGP_HELP,
    SSBGP2_HELP, TOTAL_TIMES_ABOUT, TRACE_FILE_HELP, TRACES_HELP, VERBOSE_HELP,
};
use crate::labels::Protocol;
use crate::logging::LogLevel;
use std::str::FromStr;

/// Names of the subcommands
pub const BASIC_DATA: &str = "basic-data";
pub const COUNT_TERMINATIONS: &str = "count-terminations";
pub const INV_CUMSUM: &str = "inv-cumsum";
pub const PLOT_TIMES: &str = "plot-times";
pub const TOTAL_TIMES: &str = "total-times";
pub const AVG_TIMES: &str = "avg-times";
pub const MAX_TOTAL_TIMES: &str = "max-total-times";

fn conf_file_arg() -> Arg {
    Arg::new("conf_file")
        .value_name("CONF_FILE")
        .help(CONF_FILE_HELP)
        .required(true)
}

fn ignore_non_existing_arg() -> Arg {
    Arg::new("ignore_non_existing")
        .long("ignore-non-existing")
        .help(IGNORE_NON_EXISTING_HELP)
        .action(ArgAction::SetTrue)
}

fn out_arg(default: &'static str) -> Arg {
    Arg::new("out")
        .short('o')
        .long("out")
        .value_name("PATH")
        .help(OUT_HELP)
        .default_value(default)
}

fn print_results_arg() -> Arg {
    Arg::new("print_results")
        .short('p')
        .long("print-results")
        .help(PRINT_RESULTS_HELP)
        .action(ArgAction::SetTrue)
}

/// One optional directory flag per protocol
fn protocol_args() -> Vec<Arg> {
    Protocol::ALL
        .iter()
        .map(|protocol| {
            let help = match protocol {
                Protocol::Bgp => BGP_HELP,
                Protocol::SsBgp => SSBGP_HELP,
                Protocol::SsBgp2 => SSBGP2_HELP,
            };
            Arg::new(protocol.flag())
                .long(protocol.flag())
                .value_name("DIR")
                .help(help)
        })
        .collect()
}

/// Builds the command-line interface
///
/// Defines the global arguments:
/// - `verbose`: Increase verbosity level
/// - `log_level`: Set the verbosity level by name
/// - `log_file`: Also log to a file
///
/// and one subcommand per tool.
pub fn build_cli() -> Command {
    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count)
        .global(true);

    // define arg for named log level
    let log_level = Arg::new("log_level")
        .long("log-level")
        .value_name("LEVEL")
        .help(LOG_LEVEL_HELP)
        .value_parser(LogLevel::from_str)
        .conflicts_with("verbose")
        .global(true);

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .value_name("PATH")
        .help(LOG_FILE_HELP)
        .global(true);

    let basic_data = Command::new(BASIC_DATA)
        .about(BASIC_DATA_ABOUT)
        .arg(conf_file_arg())
        .arg(ignore_non_existing_arg())
        .arg(out_arg(DEFAULT_BASIC_DATA_OUT));

    let count_terminations = Command::new(COUNT_TERMINATIONS)
        .about(COUNT_TERMINATIONS_ABOUT)
        .arg(conf_file_arg())
        .arg(ignore_non_existing_arg());

    let inv_cumsum = Command::new(INV_CUMSUM)
        .about(INV_CUMSUM_ABOUT)
        .arg(conf_file_arg())
        .arg(out_arg(DEFAULT_INV_CUMSUM_OUT));

    let plot_times = Command::new(PLOT_TIMES)
        .about(PLOT_TIMES_ABOUT)
        .arg(
            Arg::new("traces")
                .short('t')
                .long("traces")
                .value_name("LABEL=DIR")
                .help(TRACES_HELP)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("CONF_FILE")
                .help(TRACE_FILE_HELP),
        )
        .group(
            ArgGroup::new("trace_source")
                .args(["traces", "file"])
                .required(true)
                .multiple(false),
        )
        .arg(out_arg(DEFAULT_PLOT_OUT));

    let total_times = Command::new(TOTAL_TIMES)
        .about(TOTAL_TIMES_ABOUT)
        .args(protocol_args())
        .arg(out_arg(DEFAULT_LEGACY_PLOT_OUT))
        .arg(print_results_arg());

    let avg_times = Command::new(AVG_TIMES)
        .about(AVG_TIMES_ABOUT)
        .args(protocol_args())
        .arg(out_arg(DEFAULT_LEGACY_PLOT_OUT));

    let max_total_times = Command::new(MAX_TOTAL_TIMES)
        .about(MAX_TOTAL_TIMES_ABOUT)
        .args(protocol_args())
        .arg(out_arg(DEFAULT_PLOT_OUT))
        .arg(print_results_arg());

    command!()
        .author(crate_authors!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(arg_verbose)
        .arg(log_level)
        .arg(log_file)
        .subcommand(basic_data)
        .subcommand(count_terminations)
        .subcommand(inv_cumsum)
        .subcommand(plot_times)
        .subcommand(total_times)
        .subcommand(avg_times)
        .subcommand(max_total_times)
}

/// Parses the process arguments
///
/// Exits with a usage message when they are invalid.
pub fn get_matches() -> ArgMatches {
    build_cli().get_matches()
}

/// Gets the verbosity level from the command-line arguments
///
/// A `--log-level` name wins over the `-v` count.
///
/// # Examples
/// ```
/// # use ssbgp_data_tools::cli::{build_cli, get_verbosity};
/// # use ssbgp_data_tools::logging::LogLevel;
/// let matches = build_cli()
///     .try_get_matches_from(["ssbgp-tools", "-vv", "count-terminations", "conf.json"])
///     .unwrap();
///
/// assert_eq!(get_verbosity(&matches), LogLevel::Trace);
/// ```
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    if let Some(level) = matches.get_one::<LogLevel>("log_level") {
        return *level;
    }
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_occurrences(verbose_count)
}

pub fn get_log_file(matches: &ArgMatches) -> Option<String> {
    matches.get_one::<String>("log_file").cloned()
}
