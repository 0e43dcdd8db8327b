pub mod materialize;
pub mod reverse;
pub mod simulate;

use std::path::Path;

pub use materialize::Materialize;
pub use reverse::Reverse;
pub use simulate::Simulate;

// Agent //////////////////////////////////////////////////////////////////////

/// What to do with each entry the walker visits.
///
/// Paths handed to an agent are relative to the root being walked. `finalize` is
/// called once after every root has been processed, whether or not a walk failed.
pub trait Agent {
    fn handle_dir(&mut self, path: &Path) -> anyhow::Result<()>;
    fn handle_file(&mut self, path: &Path) -> anyhow::Result<()>;
    fn finalize(&mut self) -> anyhow::Result<()>;
}

// Mode ///////////////////////////////////////////////////////////////////////

/// Selects which `Agent` a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Print the transcript only.
    Simulate,
    /// Create directories and empty files.
    #[default]
    Materialize,
    /// Remove what `Materialize` created.
    Reverse,
}

impl Mode {
    /// Dry run is checked first, so it wins when both flags are set.
    pub fn from_flags(dry_run: bool, undo: bool) -> Self {
        if dry_run {
            Mode::Simulate
        } else if undo {
            Mode::Reverse
        } else {
            Mode::Materialize
        }
    }

    /// Builds the agent for this mode, acting on paths under `dest_dir`.
    pub fn agent(self, dest_dir: &Path) -> Box<dyn Agent> {
        match self {
            Mode::Simulate => Box::new(Simulate),
            Mode::Materialize => Box::new(Materialize::new(dest_dir)),
            Mode::Reverse => Box::new(Reverse::new(dest_dir)),
        }
    }
}
