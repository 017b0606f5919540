//! fitlog CLI entry point
//!
//! Loads `.env`, then delegates everything to the CLI module. Errors are
//! printed to stderr and exit with status 1.

use fitlog::cli;

fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
