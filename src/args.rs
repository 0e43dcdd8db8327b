use clap::{ArgAction, Parser};
use smart_default::SmartDefault;
use std::{env, path::PathBuf};

/// Replicate the directory structure of one or more trees as empty files and dirs.
#[derive(Debug, Parser, SmartDefault)]
#[command(author, version, about)]
pub struct Args {
    /// Source trees to replicate, processed in order
    #[arg(required = true, value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Dry run: only print what would be created
    #[arg(short = 'n')]
    pub dry_run: bool,

    /// Undo: remove a tree previously created from the same roots
    #[arg(short = 'u')]
    pub undo: bool,

    /// Create the tree under DIR instead of the current directory
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long = "config")]
    pub config_path: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where the config file is looked up when `--config` isn't given.
///
/// `None` when neither `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_dir = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_dir.join("mktree").join("config.yml"))
}
