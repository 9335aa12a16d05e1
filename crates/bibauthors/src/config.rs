//! Layout and policy configuration for an expansion run.
//!
//! A [`Config`] can be built in code, loaded from a TOML file, or both:
//!
//! ```toml
//! # ~/.config/bibauthors/config.toml
//! separator        = "semicolon"
//! authors_column   = 2
//! output_delimiter = "\t"
//! ```
//!
//! Keys left out of the file keep their defaults. Unknown keys are an error.
//! A file is only read when a run names it; nothing is picked up implicitly.

use super::*;

/// Column layout, separator policy and output format of a run.
///
/// The defaults read column 0 as the key and column 3 as the authors, split
/// on `"; "`, treat the first row as data and print `key author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// How the authors field is split
  pub separator:        SeparatorPolicy,
  /// Zero-based column of the record key
  pub key_column:       usize,
  /// Zero-based column of the authors field
  pub authors_column:   usize,
  /// Written between key and author on every output line
  pub output_delimiter: String,
  /// Whether the first row is a header to be skipped
  pub has_headers:      bool,
  /// Whether empty author names are dropped instead of printed
  pub skip_empty:       bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      separator:        SeparatorPolicy::default(),
      key_column:       0,
      authors_column:   3,
      output_delimiter: " ".to_string(),
      has_headers:      false,
      skip_empty:       false,
    }
  }
}

impl Config {
  /// Returns the default location of the config file.
  ///
  /// - On Linux: `~/.config/bibauthors/config.toml`
  /// - On macOS: `~/Library/Application Support/bibauthors/config.toml`
  /// - On Windows: `%APPDATA%\bibauthors\config.toml`
  /// - Fallback: `./bibauthors/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("bibauthors").join("config.toml")
  }

  /// Reads a config from a TOML file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads the config for a run.
  ///
  /// Only an explicitly named file is read; it must exist and parse. Without
  /// one the built-in defaults are used, whatever files exist on disk.
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    match explicit {
      Some(path) => Self::from_path(path),
      None => {
        trace!("No config file given, using defaults");
        Ok(Self::default())
      },
    }
  }

  /// Checks that the config can produce one line per pair.
  pub fn validate(&self) -> Result<()> {
    if self.output_delimiter.contains(['\n', '\r']) {
      return Err(BibError::Config("Output delimiter must not contain a line break".to_string()));
    }
    if self.separator.as_str().is_empty() {
      return Err(BibError::Config("Separator must not be empty".to_string()));
    }
    Ok(())
  }

  /// Number of fields a row needs for both configured columns to exist.
  pub fn required_fields(&self) -> usize {
    self.key_column.max(self.authors_column).saturating_add(1)
  }

  /// Sets the separator policy.
  pub fn with_separator(mut self, separator: SeparatorPolicy) -> Self {
    self.separator = separator;
    self
  }

  /// Sets the key column.
  pub fn with_key_column(mut self, column: usize) -> Self {
    self.key_column = column;
    self
  }

  /// Sets the authors column.
  pub fn with_authors_column(mut self, column: usize) -> Self {
    self.authors_column = column;
    self
  }

  /// Sets the output delimiter.
  pub fn with_output_delimiter(mut self, delimiter: impl Into<String>) -> Self {
    self.output_delimiter = delimiter.into();
    self
  }

  /// Sets whether the first row is a header.
  pub fn with_headers(mut self, has_headers: bool) -> Self {
    self.has_headers = has_headers;
    self
  }

  /// Sets whether empty author names are dropped.
  pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
    self.skip_empty = skip_empty;
    self
  }
}
