use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn wordfreq() -> Command {
    let mut cmd = Command::cargo_bin("wordfreq").unwrap();
    cmd.env_remove("WORDFREQ_CHUNK_COUNT")
        .env_remove("WORDFREQ_TOP_K")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    wordfreq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("URL"));
}

#[test]
fn test_version_flag() {
    wordfreq()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordfreq"));
}

#[test]
fn test_missing_urls_is_usage_error() {
    wordfreq()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_zero_chunks_rejected() {
    wordfreq()
        .args(["-n", "0", "http://example.com/"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("chunk count"));
}

#[test]
fn test_zero_chunks_from_environment_rejected() {
    wordfreq()
        .env("WORDFREQ_CHUNK_COUNT", "0")
        .arg("http://example.com/")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "chunk_count = \"many\"").unwrap();

    wordfreq()
        .arg("--config")
        .arg(file.path())
        .arg("http://example.com/")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_unreachable_sources_still_produce_report() {
    wordfreq()
        .args(["--no-progress", "ftp://example.com/a.txt", "not a url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no words counted)"))
        .stdout(predicate::str::contains("0 succeeded, 2 failed"))
        .stdout(predicate::str::contains("unsupported URL scheme `ftp`"));
}

#[test]
fn test_json_report() {
    wordfreq()
        .args(["--format", "json", "ftp://example.com/a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"failed\""))
        .stdout(predicate::str::contains("\"top_k\": 10"));
}
