//! Command-line behavior of the `idscan` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LICENSE_TEXT: &str =
    "AB12 123456\nName : John Smith Date Of Birth : 01-02-1990\nAddress: 12 High Street";

/// Command with an isolated, empty config file.
fn idscan(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    let mut cmd = Command::cargo_bin("idscan").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn extract_text_file_as_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("license.txt");
    fs::write(&input, LICENSE_TEXT).unwrap();

    let output = idscan(&dir)
        .args(["extract", "-t", "drivingLicense"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "John Smith");
    assert_eq!(json["licenseNumber"], "AB12 123456");
    assert_eq!(json["documentType"], "drivingLicense");
    assert_eq!(json["confidenceScore"], 100);
}

#[test]
fn extract_from_stdin_as_text() {
    let dir = TempDir::new().unwrap();

    idscan(&dir)
        .args(["extract", "--document-type", "drivingLicense", "--format", "text"])
        .write_stdin("AB12 123456\nAddress: 12 High Street")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document: Driving license"))
        .stdout(predicate::str::contains("Confidence: 50%"));
}

#[test]
fn extract_defaults_to_passport() {
    let dir = TempDir::new().unwrap();

    idscan(&dir)
        .arg("extract")
        .write_stdin("Passport No: 123456789")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""passportNumber":"123456789""#))
        .stdout(predicate::str::contains(r#""documentType":"passport""#));
}

#[test]
fn extract_unknown_type_fails() {
    let dir = TempDir::new().unwrap();

    idscan(&dir)
        .args(["extract", "-t", "libraryCard"])
        .write_stdin(LICENSE_TEXT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document type: libraryCard"));
}

#[test]
fn extract_unknown_type_uses_configured_fallback() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fallback.json");
    fs::write(
        &config,
        r#"{"extraction": {"fallback_document_type": "drivingLicense"}}"#,
    )
    .unwrap();

    Command::cargo_bin("idscan")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["extract", "-t", "libraryCard"])
        .write_stdin(LICENSE_TEXT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""documentType":"drivingLicense""#));
}

#[test]
fn extract_writes_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("result.csv");

    idscan(&dir)
        .args(["extract", "-t", "drivingLicense", "-f", "csv", "-o"])
        .arg(&out)
        .write_stdin(LICENSE_TEXT)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("licenseNumber,name,dateOfBirth,address,documentType"));
    assert!(csv.contains("AB12 123456,John Smith,01-02-1990,12 High Street,drivingLicense"));
}

#[test]
fn extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    idscan(&dir)
        .args(["extract", "/nonexistent/scan.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn types_lists_fields() {
    let dir = TempDir::new().unwrap();

    idscan(&dir)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("drivingLicense"))
        .stdout(predicate::str::contains("licenseNumber"))
        .stdout(predicate::str::contains("passportNumber"));
}

#[test]
fn types_as_json() {
    let dir = TempDir::new().unwrap();

    let output = idscan(&dir).args(["types", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["documentType"], "drivingLicense");
    assert_eq!(json[0]["fields"][3], "address");
    assert_eq!(json[1]["documentType"], "passport");
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.json");

    idscan(&dir)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("\"max_upload_bytes\": 5242880"));

    idscan(&dir)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_get_reads_given_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, r#"{"server": {"port": 8123}}"#).unwrap();

    Command::cargo_bin("idscan")
        .unwrap()
        .arg("-c")
        .arg(&path)
        .args(["config", "get", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::diff("8123\n"));
}

#[test]
fn config_set_writes_given_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");

    Command::cargo_bin("idscan")
        .unwrap()
        .arg("-c")
        .arg(&path)
        .args(["config", "set", "extraction.default_document_type", "drivingLicense"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["extraction"]["default_document_type"], "drivingLicense");

    Command::cargo_bin("idscan")
        .unwrap()
        .arg("-c")
        .arg(&path)
        .args(["config", "set", "server.port", "not-a-port"])
        .assert()
        .failure();
}

#[test]
fn config_path_reports_given_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");

    Command::cargo_bin("idscan")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()))
        .stdout(predicate::str::contains("not created"));
}
