#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;

/// Path of a fixture under `tests/data`
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// The three normalized fixtures, in merge order
pub fn normalized_fixtures() -> Vec<PathBuf> {
    ["prodigal.cgc", "genemark.cgc", "glimmer.cgc"]
        .iter()
        .map(|name| data_path(name))
        .collect()
}

/// A `cgc` command ready for arguments
pub fn cgc() -> Command {
    Command::cargo_bin("cgc").unwrap()
}

/// A `cgc-normalize` command ready for arguments
pub fn cgc_normalize() -> Command {
    Command::cargo_bin("cgc-normalize").unwrap()
}

/// Data lines of a normalized file, without the caller header comment
pub fn records(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.starts_with("# ") || line.starts_with("# END"))
        .map(str::to_string)
        .collect()
}

/// Run `cgc` with `args` and return stdout, asserting success.
pub fn run_cgc(args: &[&str]) -> String {
    let output = cgc().args(args).assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}
