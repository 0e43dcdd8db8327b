use std::io::{self, Write};

use tracing::debug;

pub mod agents;
mod args;
mod config;
mod logger;
mod utils;
pub mod walker;

// re-export
pub use agents::{Agent, Mode};
pub use args::*;
pub use config::*;
pub use logger::*;
pub use utils::*;
pub use walker::{walk_all, walk_root};

/// Entry point for the binary: builds a `Config` and runs it against stdout.
pub fn run_with_args(args: Args) -> anyhow::Result<()> {
    let config = Config::create(&args)?;
    debug!(?config, "config assembled");

    let stdout = io::stdout();
    run_with_config(&config, &mut stdout.lock())
}

/// Walks every root with the agent for `config.mode`, writing the transcript to `out`.
///
/// The agent is finalized exactly once, after the last root or the first failure.
/// A walk error takes precedence over a finalize error.
pub fn run_with_config(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let _span = enter_span!(DEBUG, "run", mode = ?config.mode);

    let mut agent = config.mode.agent(&config.dest_dir);
    let walked = walk_all(&config.roots, &config.settings, agent.as_mut(), out);
    let finalized = agent.finalize();

    walked?;
    finalized?;
    out.flush()?;

    Ok(())
}
