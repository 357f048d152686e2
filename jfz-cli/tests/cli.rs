use predicates::prelude::*;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct SampleArchive {
    _dir: TempDir,
    zip_path: PathBuf,
}

fn build_sample_archive() -> Result<SampleArchive, Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("input.json");
    let zip_path = dir.path().join("output.zip");

    fs::write(
        &input_path,
        b"{\"user\":\"alice\",\"tags\":[\"a\",\"b\"],\"active\":true}",
    )?;

    assert_cmd::Command::cargo_bin("jfz")?
        .args([
            "pack",
            input_path.to_str().unwrap(),
            "-o",
            zip_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    Ok(SampleArchive {
        _dir: dir,
        zip_path,
    })
}

#[test]
fn pack_writes_readable_archive() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_archive()?;
    let file = fs::File::open(&sample.zip_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let names: Vec<String> = archive.file_names().map(String::from).collect();
    assert!(names.contains(&"input/user.txt".to_string()));
    assert!(names.contains(&"input/tags/item_000.txt".to_string()));
    assert!(names.contains(&"input/active.json".to_string()));
    // Defaults append README and metadata at the top level.
    assert!(names.contains(&"README.md".to_string()));
    assert!(names.contains(&"_metadata.json".to_string()));

    let mut content = String::new();
    std::io::Read::read_to_string(
        &mut archive.by_name("input/user.txt")?,
        &mut content,
    )?;
    assert_eq!(content, "alice");
    Ok(())
}

#[test]
fn pack_honors_root_name_and_toggles() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("input.json");
    let zip_path = dir.path().join("output.zip");
    fs::write(&input_path, b"{\"a\":1}")?;

    assert_cmd::Command::cargo_bin("jfz")?
        .args([
            "pack",
            input_path.to_str().unwrap(),
            "-o",
            zip_path.to_str().unwrap(),
            "--root-name",
            "custom",
            "--no-metadata",
            "--no-readme",
        ])
        .assert()
        .success();

    let file = fs::File::open(&zip_path)?;
    let archive = zip::ZipArchive::new(file)?;
    let names: Vec<&str> = archive.file_names().collect();
    assert_eq!(names, ["custom/a.json"]);
    Ok(())
}

#[test]
fn pack_rejects_invalid_json() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("broken.json");
    let zip_path = dir.path().join("output.zip");
    fs::write(&input_path, b"{not json")?;

    assert_cmd::Command::cargo_bin("jfz")?
        .args([
            "pack",
            input_path.to_str().unwrap(),
            "-o",
            zip_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
    Ok(())
}

#[test]
fn pack_rejects_out_of_range_level() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("input.json");
    fs::write(&input_path, b"{}")?;

    assert_cmd::Command::cargo_bin("jfz")?
        .args([
            "pack",
            input_path.to_str().unwrap(),
            "-o",
            dir.path().join("out.zip").to_str().unwrap(),
            "--level",
            "12",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    Ok(())
}

#[test]
fn ls_table_lists_entries() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_archive()?;
    let output = assert_cmd::Command::cargo_bin("jfz")?
        .args(["ls", sample.zip_path.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output)?;
    assert!(stdout.contains("input/user.txt"));
    assert!(stdout.contains("README.md"));
    assert!(stdout.contains("entries"));
    Ok(())
}

#[test]
fn ls_json_output_parses() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_archive()?;
    let output = assert_cmd::Command::cargo_bin("jfz")?
        .args([
            "ls",
            sample.zip_path.to_str().unwrap(),
            "--format",
            "json",
            "--verbose",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listing: Value = serde_json::from_slice(&output)?;
    // 4 leaves + README + metadata
    assert_eq!(listing["count"], 6);
    let entries = listing["entries"].as_array().unwrap();
    assert!(entries.iter().all(|e| e["size"].is_u64()));
    Ok(())
}

#[test]
fn stats_json_reports_counts() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("input.json");
    fs::write(&input_path, b"{\"a\":[1,2],\"b\":{\"c\":null}}")?;

    let output = assert_cmd::Command::cargo_bin("jfz")?
        .args([
            "stats",
            input_path.to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats: Value = serde_json::from_slice(&output)?;
    assert_eq!(stats["objectCount"], 2);
    assert_eq!(stats["arrayCount"], 1);
    assert_eq!(stats["fileCount"], 3);
    assert_eq!(stats["maxDepth"], 2);
    Ok(())
}
