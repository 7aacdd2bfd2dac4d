// lexscrub/tests/cli_integration_tests.rs
//! Binary-level tests for the lexscrub CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const LEXICON_YAML: &str = r#"
categories:
  - name: forbidden
    severity: 3
    words: [best, ever]
    aliases:
      best: [b3st]
  - name: brand
    severity: 1
    words: [Nike]
  - name: keyword
    severity: 1
    words: [breathable]
"#;

fn lexicon_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp lexicon");
    file.write_all(LEXICON_YAML.as_bytes()).expect("write lexicon");
    file
}

fn lexscrub() -> Command {
    Command::cargo_bin("lexscrub").expect("binary built")
}

#[test]
fn scrub_removes_lexicon_phrases() {
    let lexicon = lexicon_file();
    lexscrub()
        .args(["--quiet", "scrub", "Buy this Nike shoe, best price ever!"])
        .arg("--lexicon")
        .arg(lexicon.path())
        .args(["--categories", "forbidden,brand", "--no-summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nike").not())
        .stdout(predicate::str::contains("best").not())
        .stdout(predicate::str::contains("shoe"));
}

#[test]
fn scrub_json_output_reports_categories() {
    let lexicon = lexicon_file();
    let output = lexscrub()
        .args(["--quiet", "scrub", "Buy this Nike shoe, best price ever!"])
        .arg("--lexicon")
        .arg(lexicon.path())
        .args(["--categories", "forbidden,brand", "--json"])
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON result");
    assert_eq!(result["removed_by_category"]["brand"][0], "Nike");
    assert_eq!(result["removed_by_category"]["forbidden"][0], "best");
    assert!(result["cleaned_text"].as_str().unwrap().contains("shoe"));
}

#[test]
fn scrub_without_categories_echoes_input() {
    let lexicon = lexicon_file();
    lexscrub()
        .args(["--quiet", "scrub", "Nike best ever"])
        .arg("--lexicon")
        .arg(lexicon.path())
        .arg("--no-summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nike best ever"));
}

#[test]
fn scrub_rejects_blank_text() {
    let lexicon = lexicon_file();
    lexscrub()
        .args(["--quiet", "scrub", "   "])
        .arg("--lexicon")
        .arg(lexicon.path())
        .args(["--categories", "forbidden"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn scrub_reads_stdin() {
    let lexicon = lexicon_file();
    lexscrub()
        .args(["--quiet", "scrub"])
        .arg("--lexicon")
        .arg(lexicon.path())
        .args(["--categories", "forbidden", "--no-summary"])
        .write_stdin("the best offer")
        .assert()
        .success()
        .stdout(predicate::str::contains("best").not())
        .stdout(predicate::str::contains("offer"));
}

#[test]
fn scrub_appends_hotwords() {
    let lexicon = lexicon_file();
    lexscrub()
        .args(["--quiet", "scrub", "limited stock today"])
        .arg("--lexicon")
        .arg(lexicon.path())
        .args(["--categories", "forbidden", "--hotwords", "VIP access", "--no-summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VIP access"));
}

#[test]
fn scrub_missing_lexicon_fails() {
    lexscrub()
        .args(["--quiet", "scrub", "some text"])
        .args(["--lexicon", "/nonexistent/lexicon.yml", "--categories", "forbidden"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lexicon"));
}

#[test]
fn lexicon_command_prints_stats() {
    let lexicon = lexicon_file();
    lexscrub()
        .args(["--quiet", "lexicon"])
        .arg(lexicon.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("forbidden"))
        .stdout(predicate::str::contains("brand"))
        .stdout(predicate::str::contains("4 entries, 1 aliases"));
}
