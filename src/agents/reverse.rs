use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, info, trace};

use super::Agent;

/// Undo. Removes empty files as they are visited and directories at `finalize`.
///
/// A file with contents is never removed: visiting one fails the walk. Directories
/// are removed deepest first, and one that can't be removed (typically because such
/// a file is still in it) is skipped silently.
#[derive(Clone, Debug)]
pub struct Reverse {
    dest_dir: PathBuf,
    /// Directories in the order they were visited.
    dirs: Vec<PathBuf>,
}

impl Reverse {
    pub fn new(dest_dir: &Path) -> Self {
        Self {
            dest_dir: dest_dir.to_path_buf(),
            dirs: Vec::new(),
        }
    }

    /// Directories queued for removal, in visit order.
    pub fn pending_dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl Agent for Reverse {
    fn handle_dir(&mut self, path: &Path) -> anyhow::Result<()> {
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    fn handle_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let target = self.dest_dir.join(path);

        // already gone, nothing to undo
        let Ok(metadata) = fs::metadata(&target) else {
            debug!(?target, "file not found, skipping");
            return Ok(());
        };

        if metadata.len() > 0 {
            anyhow::bail!("{}: not zero size", path.display());
        }

        fs::remove_file(&target).with_context(|| format!("removing file: {:?}", target))?;
        trace!(?target, "removed file");

        Ok(())
    }

    fn finalize(&mut self) -> anyhow::Result<()> {
        let mut removed = 0usize;
        let mut kept = 0usize;

        for dir in self.dirs.drain(..).rev() {
            let target = self.dest_dir.join(&dir);
            match fs::remove_dir(&target) {
                Ok(()) => removed += 1,
                Err(err) => {
                    debug!(?target, %err, "directory not removed");
                    kept += 1;
                }
            }
        }
        info!(removed, kept, "undo finished");

        Ok(())
    }
}
