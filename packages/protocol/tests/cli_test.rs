//! Binary tests running the CLI against the local fixture.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("plenarprotokoll.xml")
}

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("bundestag-protocol").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_metadata_prints_json() {
    let output = cli()
        .arg("--file")
        .arg(fixture_path())
        .arg("metadata")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["sitzung_nr"], "214");
    assert_eq!(json["sitzung_ort"], "Berlin");
}

#[test]
fn test_speech_by_id() {
    cli()
        .args(["speeches", "--id", "ID2021400300", "--file"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rede\""))
        .stdout(predicate::str::contains("Bundesministerin der Finanzen"));
}

#[test]
fn test_search_keeps_umlauts() {
    cli()
        .args(["search", "präsidentin", "--file"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"suchbegriff\": \"präsidentin\""))
        .stdout(predicate::str::contains("Frau Präsidentin!"));
}

#[test]
fn test_fraction_filter() {
    cli()
        .args(["fraction", "cdu/csu", "--file"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ID2021400200"))
        .stdout(predicate::str::contains("ID2021400100").not());
}

#[test]
fn test_download_writes_raw_xml() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("protocol.xml");

    cli()
        .arg("download")
        .arg("--output")
        .arg(&output)
        .arg("--file")
        .arg(fixture_path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to:"));

    assert_eq!(
        std::fs::read(&output).unwrap(),
        std::fs::read(fixture_path()).unwrap()
    );
}

#[test]
fn test_missing_file_fails() {
    cli()
        .args(["toc", "--file", "/nonexistent/protocol.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, "<dbtplenarprotokoll><rede>").unwrap();

    cli()
        .arg("toc")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed protocol document"));
}
