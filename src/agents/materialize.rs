use std::{
    fs::{self, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, trace};

use super::Agent;

/// Creates directories and empty files. Anything that already exists is left alone.
#[derive(Clone, Debug)]
pub struct Materialize {
    dest_dir: PathBuf,
}

impl Materialize {
    pub fn new(dest_dir: &Path) -> Self {
        Self {
            dest_dir: dest_dir.to_path_buf(),
        }
    }
}

impl Agent for Materialize {
    /// Not recursive: the walker always hands over a parent before its children.
    fn handle_dir(&mut self, path: &Path) -> anyhow::Result<()> {
        let target = self.dest_dir.join(path);
        match fs::create_dir(&target) {
            Ok(()) => trace!(?target, "created dir"),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(?target, "dir already exists");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("creating dir: {:?}", target));
            }
        }
        Ok(())
    }

    /// Opening for append never truncates, so an existing file keeps its contents.
    fn handle_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let target = self.dest_dir.join(path);
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&target)
            .with_context(|| format!("creating file: {:?}", target))?;
        trace!(?target, "ensured file");

        Ok(())
    }

    fn finalize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
