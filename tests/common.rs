#![allow(dead_code)]

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use mktree::{run_with_config, Config, Mode, WalkSettings};
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

pub fn create_test_env() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let test_path = temp_dir.path().to_path_buf();
    (temp_dir, test_path)
}

#[macro_export]
macro_rules! let_paths {
    (base = $base_dir:expr, $(( $var:ident, $file:expr $(, create = $create:tt)? )),+ $(,)?) => {
        $(
            let $var = $base_dir.join($file);
            $(
                match $create {
                    "file" => create_files!(&$var),
                    "dir" => create_dirs!(&$var),
                    _ => panic!("Invalid create type: {}", $create),
                }
            )?
        )+
    };
}

#[macro_export]
macro_rules! create_dirs {
    ($($dir:expr),+ $(,)?) => {{
        $(
            std::fs::create_dir_all($dir.clone()).expect("failed to create dirs");
        )+
    }};
}

#[macro_export]
macro_rules! create_files {
    ($($file:expr),+ $(,)?) => {{
        $(
            std::fs::File::create($file.clone()).expect("failed to create files");
        )+
    }};
}

#[macro_export]
macro_rules! write_files {
    ($(($file:expr, $contents:expr)),+ $(,)?) => {{
        $(
            std::fs::write($file.clone(), $contents).expect("failed to write file");
        )+
    }};
}

/// Config for running `mode` over `roots`, creating under `dest_dir`.
pub fn config_for(mode: Mode, roots: &[&Path], dest_dir: &Path) -> Config {
    Config {
        mode,
        roots: roots.iter().map(|r| r.to_path_buf()).collect(),
        dest_dir: dest_dir.to_path_buf(),
        settings: WalkSettings::default(),
    }
}

/// Runs a config, returning the result alongside the transcript.
pub fn run_capturing(config: &Config) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = run_with_config(config, &mut out);
    let transcript = String::from_utf8(out).expect("transcript is not UTF-8");
    (result, transcript)
}

pub fn collect_tree(root: &Path) -> HashSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| {
            e.unwrap()
                .path()
                .strip_prefix(root)
                .expect("failed to strip prefix")
                .to_path_buf()
        })
        .filter(|p| !p.as_os_str().is_empty())
        .collect::<HashSet<PathBuf>>()
}

pub fn create_exp_tree(paths: Vec<&str>) -> HashSet<PathBuf> {
    paths.iter().map(|&s| PathBuf::from(s)).collect()
}

pub fn sort_hashset(set: &HashSet<PathBuf>) -> Vec<&PathBuf> {
    set.iter().sorted_by(|a, b| a.cmp(b)).collect::<Vec<_>>()
}

pub fn assert_cur_and_exp_trees_eq(root: &Path, paths: Vec<&str>) {
    let tree = collect_tree(root);
    debug!("Sorted hashset real: {:?}", sort_hashset(&tree));

    let expected_tree = create_exp_tree(paths);
    debug!("Sorted hashset expe: {:?}", sort_hashset(&expected_tree));

    assert_eq!(sort_hashset(&tree), sort_hashset(&expected_tree));
}
