/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Extension of the per-destination summary files written by the simulator
pub const BASIC_EXTENSION: &str = ".basic.csv";

/// Extension of the per-node files written by the simulator
pub const NODES_EXTENSION: &str = ".nodes.csv";

/// Wildcard prepended to an extension to build a glob pattern
pub const WILDCARD: &str = "*";

/// Delimiter used by the simulator's CSV output
pub const DATA_DELIMITER: u8 = b';';

/// Value of the `Terminated` column for a sample that terminated
pub const TERMINATED_YES: &str = "Yes";

/// Column names recognised in the simulator's data files
pub const COLUMN_TERMINATED: &str = "Terminated";
pub const COLUMN_TOTAL_TIME: &str = "Termination Time (Total)";
pub const COLUMN_AVG_TIME: &str = "Termination Time (Avg.)";
pub const COLUMN_MESSAGE_COUNT: &str = "Message Count";
pub const COLUMN_DETECTION_COUNT: &str = "Detection Count";

/// Label given to files of an unlabeled selection
pub const DEFAULT_LABEL: &str = "data";

/// Bounds of the termination-time histogram
///
/// The histogram covers `[HISTOGRAM_LOWER, HISTOGRAM_UPPER)` in bins of
/// `HISTOGRAM_BIN_WIDTH`, which gives 20,010 bins.
pub const HISTOGRAM_LOWER: u64 = 0;
pub const HISTOGRAM_UPPER: u64 = 2_001_000;
pub const HISTOGRAM_BIN_WIDTH: u64 = 100;

/// Header of the bin column in trace tables
pub const BINS_COLUMN: &str = "Bins (x)";

/// Default output names, without extension where the tool appends one
pub const DEFAULT_BASIC_DATA_OUT: &str = "basic-data";
pub const DEFAULT_INV_CUMSUM_OUT: &str = "inv-cumsum";
pub const DEFAULT_PLOT_OUT: &str = "plot.html";
pub const DEFAULT_LEGACY_PLOT_OUT: &str = "file.html";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log records to this file";

/// Help text for the log level option
pub const LOG_LEVEL_HELP: &str =
    "Log level: error, warning, info, debug or trace (overrides --verbose)";

/// Help text for the configuration file argument
pub const CONF_FILE_HELP: &str = "JSON file mapping each dataset label to its data directory";

/// Help text for the ignore-non-existing option
pub const IGNORE_NON_EXISTING_HELP: &str =
    "Ignore data directories specified in conf file that do not exist";

/// Help text for the output option
pub const OUT_HELP: &str = "Specify a custom output path";

/// Help text for the print-results option
pub const PRINT_RESULTS_HELP: &str = "Print the computed histograms to the console";

/// Help text for the traces option
pub const TRACES_HELP: &str = "Traces given as LABEL=DIR pairs";

/// Help text for the trace file option
pub const TRACE_FILE_HELP: &str = "JSON file describing the data directory and line of each trace";

/// Columns of the basic-data report
pub const REPORT_DATASET: &str = "Dataset";
pub const REPORT_SAMPLES: &str = "Samples";
pub const REPORT_DESTINATIONS: &str = "Destinations";
pub const REPORT_TERMINATED: &str = "Terminated";
pub const REPORT_NON_TERMINATED: &str = "Non-Terminated";
pub const REPORT_AVG_TIME: &str = "Termination Times (Avg.)";
pub const REPORT_AVG_MESSAGES: &str = "Messages (Avg.)";
pub const REPORT_AVG_DEACTIVATIONS: &str = "Deactivations (Avg.)";

/// Separator between label and directory in a trace pair
pub const TRACE_PAIR_SEPARATOR: char = '=';

/// Help text for the per-protocol directory options
pub const BGP_HELP: &str = "Data directory of the BGP runs";
pub const SSBGP_HELP: &str = "Data directory of the SS-BGP runs";
pub const SSBGP2_HELP: &str = "Data directory of the SS-BGP2 runs";

/// Descriptions of the subcommands
pub const BASIC_DATA_ABOUT: &str =
    "Write sample, destination and termination statistics of each dataset to a CSV file";
pub const COUNT_TERMINATIONS_ABOUT: &str = "Print how many destinations of each dataset terminated";
pub const INV_CUMSUM_ABOUT: &str =
    "Chart and tabulate the inverse cumulative distribution of termination times";
pub const PLOT_TIMES_ABOUT: &str = "Chart the distribution of termination times of each trace";
pub const TOTAL_TIMES_ABOUT: &str = "Chart the total termination time of every sample";
pub const AVG_TIMES_ABOUT: &str = "Chart and print the average termination time of every sample";
pub const MAX_TOTAL_TIMES_ABOUT: &str =
    "Chart the largest total termination time of every destination";
