//! Campus card CLI
//!
//! Command-line interface over the campus card store.
//!
//! # Usage
//!
//! ```bash
//! campus-card seed
//! campus-card issue 50 student S01
//! campus-card recharge S02 25 --tx T100
//! campus-card cafeteria S02 1 5 --tx T101
//! campus-card cards --format csv > cards.csv
//! campus-card --data-dir /var/lib/campus replay operations.csv
//! ```
//!
//! Logs go to stderr. The filter comes from `RUST_LOG` when set, otherwise
//! from `--log-level` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: The action failed (blocked card, insufficient balance, unreadable store, ...)

use campus_card::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let today = chrono::Local::now().date_naive();
    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output, today) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
