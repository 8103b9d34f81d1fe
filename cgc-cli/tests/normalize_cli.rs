mod common;

use std::fs;
use tempfile::TempDir;

use crate::common::{cgc, cgc_normalize, data_path, records};

fn fixture_records(name: &str) -> Vec<String> {
    records(&fs::read_to_string(data_path(name)).unwrap())
}

#[test]
fn test_prodigal_sco_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("prodigal.cgc");
    let assert = cgc_normalize()
        .arg("prodigal")
        .arg(data_path("lambda.sco"))
        .arg(&output)
        .assert()
        .success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Normalization complete! 4 calls written"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# prodigal gene calls, taken from file "));
    assert_eq!(records(&text), fixture_records("prodigal.cgc"));
}

#[test]
fn test_genemark_lst_to_stdout() {
    let assert = cgc_normalize()
        .args(["-q", "GeneMark"])
        .arg(data_path("lambda.lst"))
        .assert()
        .success();
    let text = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(text.starts_with("# genemark gene calls"));
    assert_eq!(records(&text), fixture_records("genemark.cgc"));
}

#[test]
fn test_glimmer3_predict() {
    let assert = cgc_normalize()
        .args(["-q", "glimmer"])
        .arg(data_path("run3.predict"))
        .assert()
        .success();
    let text = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(records(&text), fixture_records("glimmer.cgc"));
}

#[test]
fn test_glimmer2_coord() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("g2.coord");
    fs::write(
        &input,
        "    1      191      739  [+2 L= 549 r=-1.119]\n    \
         3     3736     2798  [-1 L= 933 r=-1.064]\n",
    )
    .unwrap();
    let assert = cgc_normalize()
        .args(["-q", "--glimmer", "2", "glimmer"])
        .arg(&input)
        .assert()
        .success();
    let text = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[2].starts_with("1\t+\t191\t742\t552\t"));
    assert!(lines[3].starts_with("3\t-\t2795\t3736\t942\t"));
    assert_eq!(lines[4], "# END");
}

#[test]
fn test_prodigal_gff() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("lambda.gff");
    fs::write(
        &input,
        "##gff-version  3\n\
         NC_001416\tProdigal_v2.6.3\tCDS\t191\t736\t80.2\t+\t0\tID=1_1\n\
         NC_001416\tProdigal_v2.6.3\tCDS\t2801\t3733\t99.1\t-\t0\tID=1_2\n",
    )
    .unwrap();
    let assert = cgc_normalize()
        .args(["-q", "--prodigal", "gff", "prodigal"])
        .arg(&input)
        .assert()
        .success();
    let text = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(text.contains("1\t+\t191\t736\t546\tNC_001416\n"));
    assert!(text.contains("2\t-\t2801\t3733\t933\tNC_001416\n"));
}

#[test]
fn test_unknown_caller_fails() {
    let assert = cgc_normalize()
        .arg("augustus")
        .arg(data_path("lambda.sco"))
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Error: Cannot process unknown gene caller output: 'augustus'"));
}

#[test]
fn test_missing_arguments_print_usage() {
    let assert = cgc_normalize().arg("prodigal").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, "Usage: cgc-normalize [OPTIONS] <CALLER> <INPUT> [OUTPUT]\n");
}

#[test]
fn test_keyword_help() {
    let assert = cgc_normalize().arg("help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("cgc-normalize takes the name of a gene caller"));
}

// Raw caller output through both binaries
#[test]
fn test_normalize_then_compare() {
    let dir = TempDir::new().unwrap();
    let mut normalized = Vec::new();
    for (caller, raw) in [
        ("prodigal", "lambda.sco"),
        ("genemark", "lambda.lst"),
        ("glimmer", "run3.predict"),
    ] {
        let output = dir.path().join(format!("{caller}.cgc"));
        cgc_normalize()
            .args(["-q", caller])
            .arg(data_path(raw))
            .arg(&output)
            .assert()
            .success();
        normalized.push(output);
    }

    let assert = cgc().args(&normalized).assert().success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("3 callers, 12 calls: 2 common core, 2 partial, 2 unique"));
}
