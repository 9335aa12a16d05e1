//! Error types for the bibauthors library.
//!
//! Every failure aborts the scan. The variants map onto the three ways a run
//! can go wrong, plus configuration problems found before a run starts:
//! - I/O: the input is missing or unreadable, or the output cannot be written
//! - Parse: the input is not valid CSV
//! - Shape: a row does not have the columns the layout needs
//! - Configuration: a config file or option is invalid
//!
//! # Examples
//!
//! ```no_run
//! use bibauthors::{error::BibError, Config, Expander};
//!
//! let expander = Expander::new(Config::default());
//! match expander.run("records.csv", std::io::sink()) {
//!   Err(BibError::Shape { line, found, .. }) => println!("line {line} has {found} fields"),
//!   Err(BibError::Io(e)) => println!("I/O error: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(n) => println!("{n} pairs"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`bibauthors`](crate) crate.
pub type Result<T> = core::result::Result<T, BibError>;

/// Errors that can occur while expanding records.
#[derive(Error, Debug)]
pub enum BibError {
  /// A file system or stream operation failed.
  ///
  /// This occurs when:
  /// - The input path does not exist or is not readable
  /// - A config file cannot be read
  /// - Writing a pair to the output fails
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The input is not valid delimited text.
  ///
  /// Wraps errors from the `csv` crate, such as invalid UTF-8 inside a
  /// field. I/O errors raised while the reader pulls bytes are unwrapped
  /// into [`BibError::Io`] instead.
  #[error("Malformed CSV input: {0}")]
  Csv(csv::Error),

  /// A row has fewer fields than the column layout requires.
  ///
  /// `line` is the 1-based line the row starts on, `found` the number of
  /// fields it has and `required` the number the layout needs.
  #[error("Row on line {line} has {found} field(s), but at least {required} are required")]
  Shape {
    /// Line the offending row starts on
    line:     u64,
    /// Number of fields in the row
    found:    usize,
    /// Number of fields the layout needs
    required: usize,
  },

  /// A TOML config file could not be parsed into a [`Config`](crate::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// An option value is invalid.
  #[error("{0}")]
  Config(String),
}

impl From<csv::Error> for BibError {
  fn from(error: csv::Error) -> Self {
    if !error.is_io_error() {
      return BibError::Csv(error);
    }
    match error.into_kind() {
      csv::ErrorKind::Io(e) => BibError::Io(e),
      // `is_io_error` only holds for the `Io` kind
      kind => BibError::Io(std::io::Error::other(format!("{kind:?}"))),
    }
  }
}
