use std::process;

use human_panic::setup_panic;
use log::{error, info};

use ssbgp_data_tools::prelude::*;

fn main() {
    setup_panic!();

    let matches = get_matches();

    let log_file = get_log_file(&matches);
    if let Err(e) = init_logger(get_verbosity(&matches), log_file.as_deref()) {
        eprintln!("ERROR: Failed to initialise logging: {e}");
        process::exit(1);
    }

    if let Err(e) = run_command(&matches) {
        error!("{e}");
        info!("Failed!");
        process::exit(1);
    }
}
