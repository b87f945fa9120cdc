// rextract/tests/cli_integration_tests.rs
//! Integration tests for the rextract binary: argument handling, exit codes,
//! plain and JSON output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

// "выхухоль\n\nbadger\n\nвыхухоль2\n" in iso-8859-5.
const VYHUHOL: [u8; 28] = [
    0xd2, 0xeb, 0xe5, 0xe3, 0xe5, 0xde, 0xdb, 0xec, 0x0a, 0x0a, 0x62, 0x61, 0x64, 0x67, 0x65,
    0x72, 0x0a, 0x0a, 0xd2, 0xeb, 0xe5, 0xe3, 0xe5, 0xde, 0xdb, 0xec, 0x32, 0x0a,
];

fn rextract() -> Command {
    Command::cargo_bin("rextract").expect("binary should build")
}

fn write_fixture(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(content).expect("write fixture");
    file
}

#[test]
fn extracts_capture_group_from_file() {
    let file = write_fixture(b"a:1 b:2\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", r"b:([0-9]+)", "--output", r"\1"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn reads_stdin_when_no_file_given() {
    rextract()
        .args(["--pattern", r"value: ([0-9]+)", "--output", r"\1"])
        .write_stdin("a value: 10 in text\n")
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn empty_template_prints_whole_line_from_legacy_encoding() {
    let file = write_fixture(&VYHUHOL);
    rextract()
        .arg(file.path())
        .args(["--pattern", "хух", "--encoding", "iso-8859-5", "--start-occurrence", "2"])
        .assert()
        .success()
        .stdout("выхухоль2\n");
}

#[test]
fn no_match_exits_with_status_one() {
    let file = write_fixture(b"nothing numeric here\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", "[0-9]+"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn window_past_all_matches_exits_with_status_one() {
    let file = write_fixture(&VYHUHOL);
    rextract()
        .arg(file.path())
        .args(["--pattern", "хух", "--encoding", "iso-8859-5", "--start-occurrence", "3"])
        .assert()
        .code(1);
}

#[test]
fn invalid_pattern_exits_with_status_two() {
    let file = write_fixture(b"x\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", "("])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("compile"));
}

#[test]
fn unknown_encoding_exits_with_status_two() {
    let file = write_fixture(b"x\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", "x", "--encoding", "banana-16"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported character encoding"));
}

#[test]
fn malformed_template_degrades_to_whole_match() {
    let file = write_fixture(b"a value: 10 in text\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", r"value: ([0-9]+)", "--output", r"\@"])
        .assert()
        .success()
        .stdout("value: 10\n");
}

#[test]
fn json_output_includes_location_fields() {
    let file = write_fixture(b"first\nsecond match\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", "(match)", "--output", r"\1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value": "match""#))
        .stdout(predicate::str::contains(r#""line_number": 2"#))
        .stdout(predicate::str::contains(r#""occurrence": 1"#));
}

#[test]
fn config_file_runs_named_query() {
    let input = write_fixture(b"a:1 b:2\n");
    let mut config = NamedTempFile::new().unwrap();
    config
        .write_all(
            br#"
queries:
  - name: b_value
    pattern: "b:([0-9]+)"
    output: "\\1"
  - name: a_value
    pattern: "a:([0-9]+)"
    output: "\\1"
"#,
        )
        .unwrap();

    rextract()
        .arg(input.path())
        .args(["--config"])
        .arg(config.path())
        .args(["--query", "b_value"])
        .assert()
        .success()
        .stdout("2\n");

    rextract()
        .arg(input.path())
        .args(["--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b_value: 2"))
        .stdout(predicate::str::contains("a_value: 1"));
}

#[test]
fn pattern_and_config_are_mutually_exclusive() {
    let file = write_fixture(b"x\n");
    let config = write_fixture(b"queries: []\n");
    rextract()
        .arg(file.path())
        .args(["--pattern", "x", "--config"])
        .arg(config.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("mutually exclusive"));
}
