use std::{
    env::VarError,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use regex::Regex;
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use shellexpand::LookupError;
use smart_default::SmartDefault;
use tracing::debug;

use crate::{
    agents::Mode,
    args::{default_config_path, Args},
};

// Config /////////////////////////////////////////////////////////////////////

/// Everything a run needs, assembled from `Args` and the optional config file.
#[derive(SmartDefault, Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub roots: Vec<PathBuf>,

    /// Where the replicated tree is created (or removed from, when undoing).
    #[default(PathBuf::from("."))]
    pub dest_dir: PathBuf,

    pub settings: WalkSettings,
}

impl Config {
    pub fn create(args: &Args) -> anyhow::Result<Self> {
        let file_config = FileConfig::load(args.config_path.as_deref())?;
        Ok(Self::from_parts(args, file_config))
    }

    /// Merges the two sources. Command line flags win over the file.
    pub fn from_parts(args: &Args, file_config: FileConfig) -> Self {
        let dest_dir = args
            .directory
            .clone()
            .or(file_config.directory)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            mode: Mode::from_flags(args.dry_run, args.undo),
            roots: args.roots.clone(),
            dest_dir,
            settings: WalkSettings {
                max_depth: file_config.max_depth,
                exclude: file_config.exclude,
            },
        }
    }
}

// WalkSettings ///////////////////////////////////////////////////////////////

/// Knobs for the tree walker.
#[derive(SmartDefault, Debug, Clone)]
pub struct WalkSettings {
    /// Entries deeper than this below a root are not visited.
    #[default(None)]
    pub max_depth: Option<usize>,

    /// Entries whose file name matches any of these are skipped with their subtree.
    #[default(vec![])]
    pub exclude: Vec<Regex>,
}

// FileConfig /////////////////////////////////////////////////////////////////

/// On-disk YAML config. Every key is optional.
#[derive(SmartDefault, Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[default(None)]
    #[serde(deserialize_with = "expand_path")]
    pub directory: Option<PathBuf>,

    #[default(None)]
    pub max_depth: Option<usize>,

    #[default(vec![])]
    #[serde(with = "serde_regex")]
    pub exclude: Vec<Regex>,
}

impl FileConfig {
    /// Reads the config file at `explicit_path`, or the default location if it exists.
    ///
    /// A missing file at the default location is not an error. A missing or malformed
    /// file that was asked for explicitly is.
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        match explicit_path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                path => {
                    debug!(?path, "no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file: {:?}", path))?;
        let file_config: Self = serde_yml::from_str(&contents)
            .with_context(|| format!("parsing config file: {:?}", path))?;
        debug!(?path, ?file_config, "loaded config file");

        Ok(file_config)
    }
}

// Deserializer shell expansions //////////////////////////////////////////////

/// Trait Extension for PathBuf for shell expansions.
trait PathBufExpand {
    fn shell_expand(&self) -> Result<PathBuf, LookupError<VarError>>;
}

impl PathBufExpand for PathBuf {
    fn shell_expand(&self) -> Result<PathBuf, LookupError<VarError>> {
        self.to_str()
            .map(|s| -> Result<PathBuf, _> {
                Ok(PathBuf::from(shellexpand::full(s)?.into_owned()))
            })
            .unwrap_or_else(|| Ok(self.clone()))
    }
}

/// A custom deserializer for `Option<PathBuf>` to expand tildes and variables.
fn expand_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<PathBuf>::deserialize(deserializer)?
        .map(|p| p.shell_expand().map_err(D::Error::custom))
        .transpose()
}
