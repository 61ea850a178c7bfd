//! Link subcommand tests

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use super::{ISSUE_RULES, smartlinks_in};

#[test]
fn test_link_stdin_to_stdout_with_defaults() {
    let temp_dir = TempDir::new().unwrap();

    smartlinks_in(temp_dir.path())
        .args(["link", "--format", "markdown"])
        .write_stdin("Fixed in T1234.\n")
        .assert()
        .success()
        .stdout("Fixed in [T1234](https://phabricator.wikimedia.org/T1234).\n");
}

#[test]
fn test_link_html_escapes_plain_text() {
    let temp_dir = TempDir::new().unwrap();

    smartlinks_in(temp_dir.path())
        .arg("link")
        .write_stdin("a<b T7")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("a&lt;b <a href=\"https://phabricator.wikimedia.org/T7\""));
}

#[test]
fn test_link_uses_discovered_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".smartlinks.toml"), ISSUE_RULES).unwrap();
    let nested = temp_dir.path().join("docs");
    fs::create_dir(&nested).unwrap();
    let test_file = nested.join("notes.md");
    fs::write(&test_file, "see #42").unwrap();

    smartlinks_in(temp_dir.path())
        .args(["link", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "issue <span class=\"smart-link-active\">#42</span></a>",
        ));
}

#[test]
fn test_link_json_output() {
    let temp_dir = TempDir::new().unwrap();

    let output = smartlinks_in(temp_dir.path())
        .args(["link", "--format", "json"])
        .write_stdin("T1 x")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["type"], "link");
    assert_eq!(value[0]["trigger"], "T1");
    assert_eq!(value[1]["text"], " x");
}

#[test]
fn test_link_write_then_check() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.md");
    fs::write(&test_file, "Done: T5\n").unwrap();

    smartlinks_in(temp_dir.path())
        .args(["link", "--format", "markdown", "--check"])
        .arg(&test_file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Diff in"));

    smartlinks_in(temp_dir.path())
        .args(["link", "--format", "markdown", "--write"])
        .arg(&test_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked"));

    let content = fs::read_to_string(&test_file).unwrap();
    assert_eq!(content, "Done: [T5](https://phabricator.wikimedia.org/T5)\n");

    // Markdown links are not linked again
    smartlinks_in(temp_dir.path())
        .args(["link", "--format", "markdown", "--check"])
        .arg(&test_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No unlinked triggers"));
}

#[test]
fn test_link_skips_invalid_rules() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(
        &config,
        r#"
[[patterns]]
detect = "(unclosed"
href = "https://example.com"

[[patterns]]
detect = '\$([A-Z]+)'
href = "https://finance.example.com/quote/$1"
"#,
    )
    .unwrap();

    smartlinks_in(temp_dir.path())
        .args(["link", "--format", "markdown", "--config"])
        .arg(&config)
        .write_stdin("buy $GOOG")
        .assert()
        .success()
        .stdout("buy [$GOOG](https://finance.example.com/quote/GOOG)")
        .stderr(predicate::str::contains("rule #0 dropped"));
}

#[test]
fn test_link_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    smartlinks_in(temp_dir.path())
        .args(["link", "does-not-exist.md"])
        .assert()
        .failure();
}
