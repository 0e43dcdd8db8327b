use std::path::{Path, MAIN_SEPARATOR_STR};

use regex::Regex;

// logger addons //////////////////////////////////////////////////////////////

/// Creates and enters a new Tracing span.
#[macro_export]
macro_rules! enter_span {
    ($level:ident, $($args:tt)+) => {
        tracing::span!(tracing::Level::$level, $($args)+).entered()
    };
}

// path helpers ///////////////////////////////////////////////////////////////

/// Path of a visited entry relative to the root it was found under.
///
/// The root prefix is removed, then at most one leading separator. An entry that
/// isn't under `root` is returned as is. The root itself yields an empty path.
pub fn relative_path<'a>(root: &Path, path: &'a Path) -> &'a Path {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    stripped.strip_prefix(MAIN_SEPARATOR_STR).unwrap_or(stripped)
}

/// Returns whether a path filename matches a regex.
///
/// Paths without a file name (`/`, `..`) or with a non UTF-8 one never match.
pub fn path_matches_any_regex(path: &Path, regexes: &[Regex]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| regexes.iter().any(|r| r.is_match(name)))
}
