//! E2E tests for lector CLI

#![allow(deprecated)] // cargo_bin deprecation - will update when assert_cmd stabilizes replacement

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn lector() -> Command {
    let mut cmd = Command::cargo_bin("lector").unwrap();
    cmd.env_remove("LECTOR_TABLES").env_remove("LECTOR_SOURCES");
    cmd
}

#[test]
fn test_help() {
    lector()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("inline"))
        .stdout(predicate::str::contains("readings"));
}

#[test]
fn test_version() {
    lector()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lector"));
}

#[test]
fn test_combined_help() {
    lector()
        .args(["combined", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--anchor"))
        .stdout(predicate::str::contains("--stdin"))
        .stdout(predicate::str::contains("--tables"));
}

#[test]
fn test_convert() {
    lector()
        .args(["convert", "Genesis 1:1-5", "Wisdom 1:1", "Alleluia"])
        .assert()
        .success()
        .stdout(
            "[Genesis 1:1-5](https://biblegateway.com/passage/?search=Ge+1:1-5)\n\
             [Wisdom 1:1](https://biblegateway.com/passage/?search=Ws+1:1&version=NRSVCE)\n\
             *Alleluia*\n",
        );
}

#[test]
fn test_convert_no_args() {
    lector()
        .arg("convert")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REFERENCE"));
}

#[test]
fn test_normalize_uppercase() {
    lector()
        .args(["normalize", "--dialect", "uppercase", "GN 1:1-5", "JDT 8:1"])
        .assert()
        .success()
        .stdout("Genesis 1:1-5\nJudith 8:1\n");
}

#[test]
fn test_normalize_with_link() {
    lector()
        .args(["normalize", "-d", "uppercase", "--link", "JN 3:16"])
        .assert()
        .success()
        .stdout("[John 3:16](https://biblegateway.com/passage/?search=Jn+3:16)\n");
}

#[test]
fn test_normalize_bad_dialect() {
    lector()
        .args(["normalize", "--dialect", "latin", "GN 1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_inline_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("readings.txt");
    fs::write(&file_path, "Gospel: <a>John 3:16</a>").unwrap();

    lector()
        .args(["inline", file_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Gospel: [John 3:16](https://biblegateway.com/passage/?search=Jn+3:16)");
}

#[test]
fn test_inline_stdin() {
    lector()
        .args(["inline", "--stdin"])
        .write_stdin("<a>Tobit 1:1</a> and <a>a hymn</a>")
        .assert()
        .success()
        .stdout(
            "[Tobit 1:1](https://biblegateway.com/passage/?search=Tb+1:1&version=NRSVCE) and *a hymn*",
        );
}

#[test]
fn test_inline_no_args() {
    lector()
        .arg("inline")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_inline_file_not_found() {
    lector()
        .args(["inline", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_combined_stdin() {
    lector()
        .args(["combined", "--stdin", "--anchor", "All readings"])
        .write_stdin("<a>Genesis 1:1</a> <a>Sirach 2:3</a>")
        .assert()
        .success()
        .stdout(
            "[All readings](https://biblegateway.com/passage/?search=Ge+1:1,+Sir+2:3&version=NRSVCE)\n",
        );
}

#[test]
fn test_combined_nothing_marked() {
    lector()
        .args(["combined", "--stdin"])
        .write_stdin("no readings")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No references found"));
}

#[test]
fn test_sources() {
    lector()
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"book of common prayer""#))
        .stdout(predicate::str::contains(r#""bcp""#));
}

#[test]
fn test_custom_tables_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("tables.yaml");
    fs::write(
        &file_path,
        r#"
search_url: "https://example.org/find?q="
edition: KJV
uppercase: {}
mixed: {}
replacements: {}
shortening:
  Genesis: Gen
deuterocanon: []
"#,
    )
    .unwrap();

    lector()
        .args(["--tables", file_path.to_str().unwrap(), "convert", "Genesis 1:1"])
        .assert()
        .success()
        .stdout("[Genesis 1:1](https://example.org/find?q=Gen+1:1)\n");
}

#[test]
fn test_invalid_tables_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("tables.yaml");
    fs::write(&file_path, "search_url: [not, a, url]").unwrap();

    lector()
        .args(["convert", "Genesis 1:1"])
        .env("LECTOR_TABLES", file_path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load tables"));
}

#[test]
fn test_readings_unknown_source() {
    lector()
        .args(["readings", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown source"))
        .stderr(predicate::str::contains("book of common prayer"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_readings_from_local_server() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<ul><li class='reading'>Baruch 3:9-15</li><li class='reading'>Mark 1:1</li></ul>",
        ))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("sources.yaml");
    fs::write(
        &file_path,
        format!(
            "- id: local\n  name: local office\n  aliases: [l]\n  url: \"{}/%Y-%m-%d\"\n  selector: li.reading\n  author: Local\n",
            server.uri()
        ),
    )
    .unwrap();
    let sources = file_path.to_str().unwrap().to_string();

    let assert = tokio::task::spawn_blocking(move || {
        lector()
            .args(["--sources", &sources, "readings", "l"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains(r#""source":"local office""#))
        .stdout(predicate::str::contains("search=Bar+3:9-15,+Mk+1:1&version=NRSVCE"));
}
