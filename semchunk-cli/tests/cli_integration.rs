//! Integration tests for the semchunk CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const POST: &str = "---\ntitle: Hello World\nslug: hello-world\ndate: 2024-06-01\ntags:\n  - intro\n---\n# Hello World\n\nFirst paragraph of the post. It has a couple of sentences.\n\n## Details\n\nSecond paragraph with more detail. It also runs a few sentences long.\n";

fn write_post(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn process_writes_one_json_file_per_chunk() {
    let blog = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_post(&blog, "hello-world.md", POST);

    let mut cmd = Command::cargo_bin("semchunk").unwrap();
    cmd.arg("process")
        .arg("-i")
        .arg(format!("{}/*.md", blog.path().display()))
        .arg("-o")
        .arg(out.path())
        .arg("--quiet");
    cmd.assert().success();

    let names: Vec<String> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| n.starts_with("post_hello-world__ch")));
    assert!(names.iter().any(|n| n == "post_hello-world__ch0.json"));
}

#[test]
fn chunk_records_carry_ids_and_metadata() {
    let blog = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_post(&blog, "hello-world.md", POST);

    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("process")
        .arg("-i")
        .arg(format!("{}/*.md", blog.path().display()))
        .arg("-o")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .success();

    let first = fs::read_to_string(out.path().join("post_hello-world__ch0.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(record["id"], "post:hello-world::ch0");
    assert_eq!(record["parent_id"], "post:hello-world");
    assert_eq!(record["chunk_number"], 0);
    assert_eq!(record["prev_id"], serde_json::Value::Null);
    assert_eq!(record["metadata"]["title"], "Hello World");
    assert_eq!(record["metadata"]["tags"][0], "intro");
    assert!(record["text_for_embedding"]
        .as_str()
        .unwrap()
        .starts_with("Title: Hello World"));
    assert_eq!(record["original_file_sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn document_without_front_matter_uses_heading_and_stem() {
    let blog = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_post(
        &blog,
        "plain-notes.md",
        "# Plain Notes\n\nJust some body text without front matter.\n",
    );

    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("process")
        .arg("-i")
        .arg(format!("{}/*.md", blog.path().display()))
        .arg("-o")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .success();

    let first = fs::read_to_string(out.path().join("post_plain-notes__ch0.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(record["metadata"]["title"], "Plain Notes");
    assert_eq!(record["metadata"]["slug"], "plain-notes");
}

#[test]
fn failing_document_does_not_abort_the_run() {
    let blog = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_post(&blog, "good.md", POST);
    // Unterminated front matter makes this one fail.
    write_post(&blog, "broken.md", "---\ntitle: Broken\n\nno closing fence");

    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("process")
        .arg("-i")
        .arg(format!("{}/*.md", blog.path().display()))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    assert!(out.path().join("post_hello-world__ch0.json").exists());
}

#[test]
fn no_matching_files_fails() {
    let empty = TempDir::new().unwrap();
    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("process")
        .arg("-i")
        .arg(format!("{}/*.md", empty.path().display()))
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files matched"));
}

#[test]
fn generate_config_then_validate_round_trips() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("semchunk.toml");

    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("generate-config")
        .arg("-o")
        .arg(&config_path)
        .assert()
        .success();
    assert!(config_path.exists());

    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("validate")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn generate_config_prints_to_stdout_by_default() {
    Command::cargo_bin("semchunk")
        .unwrap()
        .arg("generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[chunking]"))
        .stdout(predicate::str::contains("max_chunk_tokens = 625"));
}

#[test]
fn parallel_run_produces_the_same_files() {
    let blog = TempDir::new().unwrap();
    let out_seq = TempDir::new().unwrap();
    let out_par = TempDir::new().unwrap();
    write_post(&blog, "a.md", POST);
    write_post(
        &blog,
        "b.md",
        "---\ntitle: Second Post\nslug: second-post\n---\n# Second Post\n\nBody of the second post. More sentences follow here.\n",
    );

    for (out, parallel) in [(&out_seq, false), (&out_par, true)] {
        let mut cmd = Command::cargo_bin("semchunk").unwrap();
        cmd.arg("process")
            .arg("-i")
            .arg(format!("{}/*.md", blog.path().display()))
            .arg("-o")
            .arg(out.path())
            .arg("--quiet");
        if parallel {
            cmd.arg("--parallel").arg("--threads").arg("2");
        }
        cmd.assert().success();
    }

    let mut seq: Vec<String> = fs::read_dir(out_seq.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    let mut par: Vec<String> = fs::read_dir(out_par.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    seq.sort();
    par.sort();
    assert_eq!(seq, par);

    for name in &seq {
        let a = fs::read_to_string(out_seq.path().join(name)).unwrap();
        let b = fs::read_to_string(out_par.path().join(name)).unwrap();
        assert_eq!(a, b, "parallel output diverged for {name}");
    }
}
