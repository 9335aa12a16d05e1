//! File-based tests for the expansion scan.

use std::{
  fs,
  path::{Path, PathBuf},
};

use bibauthors::{prelude::*, AuthorPair, Config, Expander};
use tempfile::{tempdir, TempDir};

/// Sample export mixing both separator styles, quoting and an empty field.
const RECORDS: &str = "\
smith2001,\"Graphs, Trees and Forests\",2001,Smith; Jones; Brown
lee1999,On Lists,1999,Lee
kim2010,Mixed Separators,2010,Kim; Park;Choi
nobody2000,Anonymous Work,2000,
";

fn write_records(contents: &str) -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let path = dir.path().join("records.csv");
  fs::write(&path, contents).unwrap();
  (dir, path)
}

fn run_to_string(config: Config, path: &Path) -> Result<String, BibError> {
  let mut output = Vec::new();
  Expander::new(config).run(path, &mut output)?;
  Ok(String::from_utf8(output).expect("output is valid UTF-8"))
}

#[test]
fn test_end_to_end_default_policy() -> anyhow::Result<()> {
  let (_dir, path) = write_records("k1,title,year,Alice; Bob; Carol\n");
  let output = run_to_string(Config::default(), &path)?;
  assert_eq!(output, "k1 Alice\nk1 Bob\nk1 Carol\n");
  Ok(())
}

#[test]
fn test_separator_policies_on_mixed_field() -> anyhow::Result<()> {
  let (_dir, path) = write_records("k,t,y,A; B;C\n");

  let spaced: Vec<AuthorPair> =
    Expander::new(Config::default()).pairs_from_path(&path)?.collect::<Result<_, _>>()?;
  let spaced: Vec<_> = spaced.into_iter().map(|pair| pair.author).collect();
  assert_eq!(spaced, vec!["A", "B;C"]);

  let bare: Vec<AuthorPair> =
    Expander::new(Config::default().with_separator(SeparatorPolicy::Semicolon))
      .pairs_from_path(&path)?
      .collect::<Result<_, _>>()?;
  let bare: Vec<_> = bare.into_iter().map(|pair| pair.author).collect();
  assert_eq!(bare, vec!["A", " B", "C"]);
  Ok(())
}

#[test]
fn test_pair_count_matches_non_empty_splits() -> anyhow::Result<()> {
  let (_dir, path) = write_records(RECORDS);
  let config = Config::default().with_skip_empty(true);
  let policy = config.separator.clone();

  let expected: usize = RECORDS
    .lines()
    .map(|line| {
      let authors = line.rsplit(',').next().unwrap_or_default();
      policy.split(authors).filter(|name| !name.is_empty()).count()
    })
    .sum();

  let mut output = Vec::new();
  let written = Expander::new(config).run(&path, &mut output)?;
  assert_eq!(written as usize, expected);
  assert_eq!(String::from_utf8(output)?.lines().count(), expected);
  Ok(())
}

#[test]
fn test_same_file_same_output() -> anyhow::Result<()> {
  let (_dir, path) = write_records(RECORDS);
  let first = run_to_string(Config::default(), &path)?;
  let second = run_to_string(Config::default(), &path)?;
  assert_eq!(first, second);
  assert!(first.starts_with("smith2001 Smith\nsmith2001 Jones\nsmith2001 Brown\nlee1999 Lee\n"));
  assert!(first.ends_with("nobody2000 \n"));
  Ok(())
}

#[test]
fn test_missing_file() {
  let dir = tempdir().unwrap();
  let result = run_to_string(Config::default(), &dir.path().join("missing.csv"));
  assert!(matches!(result, Err(BibError::Io(_))));
}

#[test]
fn test_short_row_aborts_with_partial_output() {
  let (_dir, path) = write_records("k1,t,y,Alice\nk2,t,y\nk3,t,y,Carol\n");
  let expander = Expander::new(Config::default());
  let mut output = Vec::new();

  let result = expander.run(&path, &mut output);
  assert!(matches!(result, Err(BibError::Shape { line: 2, found: 3, required: 4 })));
  assert_eq!(output, b"k1 Alice\n");
}

#[test]
fn test_config_file_drives_run() -> anyhow::Result<()> {
  let (dir, path) = write_records("id;authors\nk1;\"Alice|Bob\"\n");
  let config_path = dir.path().join("config.toml");
  fs::write(
    &config_path,
    "separator = \"|\"\nauthors_column = 1\nhas_headers = true\noutput_delimiter = \",\"\n",
  )?;
  // Fields are separated by ';' here, so the whole line is one field.
  let config = Config::load(Some(config_path.as_path()))?;
  let result = run_to_string(config.clone(), &path);
  assert!(matches!(result, Err(BibError::Shape { found: 1, required: 2, .. })));

  let (_dir, path) = write_records("id,authors\nk1,Alice|Bob\n");
  assert_eq!(run_to_string(config, &path)?, "k1,Alice\nk1,Bob\n");
  Ok(())
}
