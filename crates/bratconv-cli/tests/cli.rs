//! End-to-end tests for the bratconverter binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const CONF: &str = "\
[entities]
PERSON
ORG

[relations]
works_for Arg1:PERSON, Arg2:ORG

[events]
";

fn bratconverter() -> Command {
    let mut cmd = Command::cargo_bin("bratconverter").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_JSON")
        .env_remove("BRATCONV_TEST_PREFIX")
        .env_remove("BRATCONV_STRICT_RELATIONS");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Collection with one regular and one test document
fn collection() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "annotation.conf", CONF);
    write(
        tmp.path(),
        "news.ann",
        "T1\tPERSON 0 4\tJohn\nT2\tORG 15 18\tIBM\nT3\tDATE 22 26\t2019\nR1\tworks_for Arg1:T1 Arg2:T2\n",
    );
    write(tmp.path(), "news.txt", "John works for IBM\r\nin 2019");
    write(tmp.path(), "t_memo.ann", "T1\tORG 0 3\tACME\n");
    write(tmp.path(), "t_memo.txt", "ACME\nmemo");
    tmp
}

fn parse_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn binary_reports_version() {
    bratconverter()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bratconverter"));
}

#[test]
fn folder_conversion_prints_acharya_lines() {
    let tmp = collection();

    let assert = bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .assert()
        .success();
    let records = parse_lines(&assert.get_output().stdout);

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0],
        json!({
            "id": "news",
            "Data": "John works for IBM\r\nin 2019",
            "Entities": [[0, 4, "PERSON"], [15, 18, "ORG"]],
            "Relations": [{"head": [0, 4], "tail": [15, 18], "name": "works_for"}],
        })
    );
    assert_eq!(records[1]["id"], "t_memo");
    assert_eq!(records[1]["test"], true);
    assert_eq!(records[1]["Entities"], json!([[0, 3, "ORG"]]));
}

#[test]
fn explicit_files_conversion() {
    let tmp = collection();
    let path = |name: &str| tmp.path().join(name).display().to_string();

    let assert = bratconverter()
        .args(["-a", &format!("{},{}", path("t_memo.ann"), path("news.ann"))])
        .args(["-t", &format!("{},{}", path("t_memo.txt"), path("news.txt"))])
        .args(["-c", &path("annotation.conf")])
        .assert()
        .success();
    let records = parse_lines(&assert.get_output().stdout);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "t_memo");
    assert_eq!(records[1]["id"], "news");
}

#[test]
fn output_file_is_written() {
    let tmp = collection();
    let out = tmp.path().join("out.jsonl");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("successfully generated file"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(!written.ends_with('\n'));
}

#[test]
fn existing_output_requires_force() {
    let tmp = collection();
    let out = tmp.path().join("out.jsonl");
    fs::write(&out, "keep me").unwrap();

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("-o")
        .arg(&out)
        .arg("--force")
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("{\"id\":\"news\""));
}

#[test]
fn empty_entities_section_fails() {
    let tmp = collection();
    write(tmp.path(), "annotation.conf", "[entities]\n\n[relations]\n");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[entities]"));
}

#[test]
fn missing_text_file_fails() {
    let tmp = collection();
    write(tmp.path(), "orphan.ann", "");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("orphan.txt file does not exist"));
}

#[test]
fn discontinuous_annotation_aborts_batch() {
    let tmp = collection();
    write(tmp.path(), "news.ann", "T1\tPERSON 0 2;3 4\tJo n\n");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("discontinuous"));
}

#[test]
fn unreadable_settings_file_fails() {
    let tmp = collection();

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("--settings")
        .arg(tmp.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read settings file"));
}

#[test]
fn strict_flag_rejects_dangling_relation() {
    let tmp = collection();

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .assert()
        .success();

    write(
        tmp.path(),
        "news.ann",
        "T1\tPERSON 0 4\tJohn\nR1\tworks_for Arg1:T1 Arg2:T7\n",
    );
    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("T7"));
}

#[test]
fn force_without_output_fails() {
    let tmp = collection();

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("-f")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "force flag is provided but output file is not specified",
        ));
}

#[test]
fn mismatched_file_lists_fail() {
    bratconverter()
        .args(["-a", "one.ann", "-t", "two.txt", "-c", "annotation.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("to correspond to: one.txt"));
}

#[test]
fn standoff_blocks_are_written() {
    let tmp = collection();
    let out = TempDir::new().unwrap();
    let standoff = out.path().join("standoff");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("--standoff-dir")
        .arg(&standoff)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(standoff.join("news.ann")).unwrap(),
        "T1\tPERSON 0 4\tJohn\nT2\tORG 15 18\tIBM\nR1\tworks_for Arg1:T1 Arg2:T2\t"
    );
    assert_eq!(
        fs::read_to_string(standoff.join("t_memo.ann")).unwrap(),
        "T1\tORG 0 3\tACM"
    );
}

#[test]
fn standoff_blocks_with_shared_stem_fail() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "annotation.conf", CONF);
    fs::create_dir_all(tmp.path().join("a")).unwrap();
    fs::create_dir_all(tmp.path().join("b")).unwrap();
    write(&tmp.path().join("a"), "doc.ann", "T1\tPERSON 0 4\tJohn\n");
    write(&tmp.path().join("a"), "doc.txt", "John");
    write(&tmp.path().join("b"), "doc.ann", "T1\tORG 0 3\tIBM\n");
    write(&tmp.path().join("b"), "doc.txt", "IBM");
    let out = TempDir::new().unwrap();
    let standoff = out.path().join("standoff");

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("--standoff-dir")
        .arg(&standoff)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("multiple documents"));
    assert!(!standoff.join("doc.ann").exists());
}

#[test]
fn standoff_dir_inside_collection_fails() {
    let tmp = collection();

    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("--standoff-dir")
        .arg(tmp.path().join("standoff"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("inside the collection"));
    assert!(!tmp.path().join("standoff").exists());

    // The collection stays convertible
    bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .assert()
        .success();
}

#[test]
fn settings_file_changes_test_prefix() {
    let tmp = collection();
    let settings = tmp.path().join("bratconv.toml");
    fs::write(&settings, "[convert]\ntest_prefix = \"news\"\n").unwrap();

    let assert = bratconverter()
        .arg("-p")
        .arg(tmp.path())
        .arg("--settings")
        .arg(&settings)
        .assert()
        .success();
    let records = parse_lines(&assert.get_output().stdout);

    assert_eq!(records[0]["test"], true);
    assert!(records[1].get("test").is_none());
}
