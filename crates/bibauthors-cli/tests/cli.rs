//! Integration tests for the display-authors CLI.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

// Helper function to create a clean command instance
fn display_authors() -> Command { Command::cargo_bin("display-authors").unwrap() }

// Helper to write an input file into a fresh temporary directory
fn records(contents: &str) -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let path = dir.path().join("records.csv");
  fs::write(&path, contents).unwrap();
  (dir, path)
}

#[test]
fn test_default_run() {
  let (_dir, path) = records("k1,title,year,Alice; Bob; Carol\n");

  display_authors().arg(&path).assert().success().stdout("k1 Alice\nk1 Bob\nk1 Carol\n");
}

#[test]
fn test_bare_semicolon_policy() {
  let (_dir, path) = records("k,t,y,A; B;C\n");

  display_authors()
    .arg("--separator")
    .arg("semicolon")
    .arg(&path)
    .assert()
    .success()
    .stdout("k A\nk  B\nk C\n");
}

#[test]
fn test_tab_delimiter_and_headers() {
  let (_dir, path) = records("key,title,year,authors\nk1,t,y,Alice; Bob\n");

  display_authors()
    .args(["--delimiter", "\\t", "--has-headers"])
    .arg(&path)
    .assert()
    .success()
    .stdout("k1\tAlice\nk1\tBob\n");
}

#[test]
fn test_config_file_with_flag_override() {
  let (dir, path) = records("Alice|Bob,k1\n");
  let config = dir.path().join("config.toml");
  fs::write(&config, "separator = \"|\"\nkey_column = 1\nauthors_column = 0\n").unwrap();

  display_authors()
    .arg("--config")
    .arg(&config)
    .args(["-d", ":"])
    .arg(&path)
    .assert()
    .success()
    .stdout("k1:Alice\nk1:Bob\n");
}

// Writes a user config that would change the output if it were read
fn user_config_home() -> TempDir {
  let home = tempdir().unwrap();
  let config = "separator = \"semicolon\"\nauthors_column = 0\n";
  for dir in [home.path().join(".config/bibauthors"), home.path().join("xdg/bibauthors")] {
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), config).unwrap();
  }
  home
}

#[test]
fn test_user_config_ignored_without_flag() {
  let (_dir, path) = records("k1,title,year,Alice; Bob; Carol\n");
  let home = user_config_home();

  display_authors()
    .env("HOME", home.path())
    .env("XDG_CONFIG_HOME", home.path().join("xdg"))
    .arg(&path)
    .assert()
    .success()
    .stdout("k1 Alice\nk1 Bob\nk1 Carol\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_read_with_flag() {
  let (_dir, path) = records("k1,title,year,Alice; Bob; Carol\n");
  let home = user_config_home();

  display_authors()
    .env("HOME", home.path())
    .env("XDG_CONFIG_HOME", home.path().join("xdg"))
    .arg("--user-config")
    .arg(&path)
    .assert()
    .success()
    .stdout("k1 k1\n");
}

#[test]
fn test_blank_line_aborts_after_earlier_output() {
  let (_dir, path) = records("k1,t,y,Alice\n\nk2,t,y,Bob\n");

  display_authors()
    .arg(&path)
    .assert()
    .failure()
    .code(1)
    .stdout("k1 Alice\n")
    .stderr(predicate::str::contains("line 2 has 0 field(s)"));
}

#[test]
fn test_missing_file_fails() {
  let dir = tempdir().unwrap();

  display_authors()
    .arg(dir.path().join("missing.csv"))
    .assert()
    .failure()
    .code(1)
    .stdout("")
    .stderr(predicate::str::contains("✗"));
}

#[test]
fn test_short_row_aborts_after_earlier_output() {
  let (_dir, path) = records("k1,t,y,Alice\nk2,t,y\nk3,t,y,Carol\n");

  display_authors()
    .arg(&path)
    .assert()
    .failure()
    .code(1)
    .stdout("k1 Alice\n")
    .stderr(predicate::str::contains("line 2 has 3 field(s)"));
}

#[test]
fn test_empty_separator_rejected() {
  let (_dir, path) = records("k1,t,y,Alice\n");

  display_authors().args(["--separator", ""]).arg(&path).assert().failure().stdout("");
}

#[test]
fn test_missing_path_argument() {
  display_authors().assert().failure().stderr(predicate::str::contains("Usage"));
}
