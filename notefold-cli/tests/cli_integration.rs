//! Integration tests for the notefold CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/HadjiMuradNotebook.html";

/// Copy the fixture notebook into a scratch directory so derived
/// outputs land there.
fn staged_fixture(dir: &TempDir) -> PathBuf {
    let target = dir.path().join("HadjiMuradNotebook.html");
    fs::copy(Path::new(FIXTURE), &target).unwrap();
    target
}

#[test]
fn process_writes_a_condensed_notebook() {
    let dir = TempDir::new().unwrap();
    let input = staged_fixture(&dir);

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process").arg("-i").arg(&input).arg("-q");
    cmd.assert().success();

    let output = dir.path().join("HadjiMuradNotebookAggregated.html");
    let content = fs::read_to_string(&output).unwrap();

    // Runs within chapter I merged; chapter II started a new block.
    assert!(content.contains("“Who is he?” (Note: First impression.) He rode up to the gate of Shamil in Vedén."));
    assert!(content.contains("(e0-2,cI,p11,l116-121)"));
    assert!(content.contains("an order had come from Shamil to Hadji Murád."));
    assert!(content.contains("(e3,cII,p15,l160)"));

    // Synthesized chapter headings precede their runs.
    assert!(content.contains("<h3 class='chapterHeading'>Chapter I</h3>"));
    assert!(content.contains("<h3 class='chapterHeading'>Chapter II</h3>"));

    // Note headings are gone and the stylesheet gained the new rules.
    assert!(!content.contains("class=\"noteHeading\""));
    assert!(content.contains(".locationStyle"));
    assert!(!content.contains("text-align: center"));
}

#[test]
fn text_format_prints_blocks_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = staged_fixture(&dir);

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process").arg("-i").arg(&input).arg("-q").arg("-f").arg("text");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Chapter I"))
        .stdout(predicate::str::contains("“Who is he?”"))
        .stdout(predicate::str::contains("(e0-2,cI,p11,l116-121)"))
        .stdout(predicate::str::contains("Chapter II"));
}

#[test]
fn json_format_emits_block_metadata() {
    let dir = TempDir::new().unwrap();
    let input = staged_fixture(&dir);

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process").arg("-i").arg(&input).arg("-q").arg("-f").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"range\": \"cI,p11,l116-121\""))
        .stdout(predicate::str::contains("\"chapter_label\": \"Chapter II\""))
        .stdout(predicate::str::contains("\"first_element\": 0"));
}

#[test]
fn output_flag_redirects_the_document() {
    let dir = TempDir::new().unwrap();
    let input = staged_fixture(&dir);
    let output = dir.path().join("condensed.html");

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process")
        .arg("-i")
        .arg(&input)
        .arg("-q")
        .arg("-o")
        .arg(&output);

    cmd.assert().success();
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("(e0-2,cI,p11,l116-121)"));
}

#[test]
fn tighter_location_proximity_splits_more() {
    let dir = TempDir::new().unwrap();
    let input = staged_fixture(&dir);

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process")
        .arg("-i")
        .arg(&input)
        .arg("-q")
        .arg("-f")
        .arg("text")
        .arg("--location-prox")
        .arg("1");

    // 116 -> 118 already exceeds a tolerance of 1.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(e0,cI,p11,l116)"));
}

#[test]
fn directory_scan_picks_up_notebooks_and_skips_outputs() {
    let dir = TempDir::new().unwrap();
    staged_fixture(&dir);
    // A previous run's output and an unrelated name, both ignored.
    fs::copy(
        Path::new(FIXTURE),
        dir.path().join("HadjiMuradNotebookAggregated.html"),
    )
    .unwrap();
    fs::write(dir.path().join("unrelated.html"), "<html></html>").unwrap();

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process").arg("--in-dir").arg(dir.path()).arg("-q");
    cmd.assert().success();

    let output = fs::read_to_string(dir.path().join("HadjiMuradNotebookAggregated.html")).unwrap();
    assert!(output.contains("locationStyle"));
}

#[test]
fn non_notebook_files_are_skipped_with_a_warning() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("PlainNotebook.html");
    fs::write(&plain, "<html><style>.plain {}</style><body>hi</body></html>").unwrap();

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process").arg("-i").arg(&plain);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("does not appear to be a notebook"));
    assert!(!dir.path().join("PlainNotebookAggregated.html").exists());
}

#[test]
fn missing_input_fails_with_a_diagnostic() {
    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process").arg("-i").arg("nonexistent.html").arg("-q");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn config_file_supplies_proximities() {
    let dir = TempDir::new().unwrap();
    let input = staged_fixture(&dir);
    let config = dir.path().join("notefold.toml");
    fs::write(&config, "[proximity]\nlocation = 1\n").unwrap();

    let mut cmd = Command::cargo_bin("notefold").unwrap();
    cmd.arg("process")
        .arg("-i")
        .arg(&input)
        .arg("-q")
        .arg("-f")
        .arg("text")
        .arg("-c")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(e0,cI,p11,l116)"));
}
