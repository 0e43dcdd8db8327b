use std::{
    fmt,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    agents::Agent,
    enter_span,
    utils::{path_matches_any_regex, relative_path},
    WalkSettings,
};

// Transcript /////////////////////////////////////////////////////////////////

/// Kind of a visited entry. Anything that isn't a directory counts as a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// One transcript line, describing what gets created for an entry.
#[derive(Clone, Copy, Debug)]
pub struct TranscriptLine<'a> {
    pub kind: EntryKind,
    pub path: &'a Path,
}

impl fmt::Display for TranscriptLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Dir => write!(f, "mkdir      \"{}\"", self.path.display()),
            EntryKind::File => write!(f, "type nul > \"{}\"", self.path.display()),
        }
    }
}

// Walking ////////////////////////////////////////////////////////////////////

/// Walks every root in order, stopping at the first one that fails.
///
/// The error is wrapped with the root's path, so `{:#}` renders as `<root>: <cause>`.
pub fn walk_all(
    roots: &[PathBuf],
    settings: &WalkSettings,
    agent: &mut dyn Agent,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for root in roots {
        walk_root(root, settings, agent, out).with_context(|| root.display().to_string())?;
    }
    Ok(())
}

/// Walks one root depth-first, directories before their contents.
///
/// Each entry below the root gets a transcript line on `out` and is then handed to
/// `agent`. The root itself is skipped. Any traversal or agent error ends the walk.
pub fn walk_root(
    root: &Path,
    settings: &WalkSettings,
    agent: &mut dyn Agent,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let _span = enter_span!(INFO, "walk", root = %root.display());

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if let Some(max_depth) = settings.max_depth {
        walker = walker.max_depth(max_depth);
    }

    let entries = walker.into_iter().filter_entry(|entry| {
        let excluded =
            entry.depth() > 0 && path_matches_any_regex(entry.path(), &settings.exclude);
        if excluded {
            debug!(path = ?entry.path(), "excluded");
        }
        !excluded
    });

    let mut visited = 0usize;
    for entry in entries {
        let entry = entry.map_err(|err| walk_error(root, err))?;

        let path = relative_path(root, entry.path());
        if path.as_os_str().is_empty() {
            continue;
        }

        let kind = if entry.file_type().is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        writeln!(out, "{}", TranscriptLine { kind, path }).context("writing transcript")?;

        match kind {
            EntryKind::Dir => agent.handle_dir(path)?,
            EntryKind::File => agent.handle_file(path)?,
        }
        visited += 1;
    }
    info!(visited, "walk finished");

    Ok(())
}

/// Unwraps the I/O error inside a `walkdir::Error`, whose own message would repeat it.
///
/// The failing path is added as context unless it's the root, which the caller names.
fn walk_error(root: &Path, err: walkdir::Error) -> anyhow::Error {
    let path = err.path().filter(|p| *p != root).map(Path::to_path_buf);

    // loops are the only non-I/O error and need followed links, which are never followed
    let err = match err.into_io_error() {
        Some(io_err) => anyhow::Error::new(io_err),
        None => anyhow::anyhow!("filesystem loop found"),
    };

    match path {
        Some(path) => err.context(path.display().to_string()),
        None => err,
    }
}
