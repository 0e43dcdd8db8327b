use std::process::ExitCode;

use clap::Parser;
use mktree::{run_with_args, Args, Logger};

fn main() -> ExitCode {
    let args = Args::parse();
    let _logger = Logger::new(Logger::level_from_verbosity(args.verbose));

    match run_with_args(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
