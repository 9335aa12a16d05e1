//! Bibliographic record expansion library.
//!
//! `bibauthors` reads a CSV file of bibliographic records and expands every
//! record into one `(key, author)` pair per author named in its authors
//! column. It provides:
//!
//! - A lazy, fail-fast iterator over the pairs of a CSV source
//! - Configurable separator policies for splitting the authors field
//! - Configurable column layout, header handling and output delimiter
//! - TOML configuration files with platform default locations
//!
//! # Getting Started
//!
//! ```no_run
//! use bibauthors::{prelude::*, Config, Expander};
//!
//! # fn main() -> Result<(), BibError> {
//! let expander = Expander::new(Config::default());
//! let stdout = std::io::stdout();
//! let written = expander.run("records.csv", stdout.lock())?;
//! eprintln!("{written} pairs");
//! # Ok(())
//! # }
//! ```
//!
//! # Input Layout
//!
//! By default column 0 holds the record key and column 3 holds the authors,
//! joined by `"; "`. The first row is treated as data. Quoting follows the
//! usual CSV rules, so an authors field may contain commas when quoted:
//!
//! ```text
//! k1,Some Title,2019,"Doe, Jane; Roe, Richard"
//! ```
//!
//! # Module Organization
//!
//! - [`separator`]: How an authors field is split into names
//! - [`record`]: Rows extracted from CSV records and the pairs they produce
//! - [`config`]: Layout and policy configuration
//! - [`expander`]: The scan itself
//! - [`error`]: Error type shared by all of the above

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  fs::File,
  io::{self, Read, Write},
  path::{Path, PathBuf},
  str::FromStr,
};

use serde::{Deserialize, Serialize};
#[cfg(test)] use tracing_test::traced_test;
use tracing::{debug, trace, warn};

pub mod config;
pub mod error;
pub mod expander;
pub mod record;
pub mod separator;

pub use crate::{
  config::Config,
  expander::{AuthorPairs, Expander},
  record::{AuthorPair, Row},
  separator::SeparatorPolicy,
};
use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```
/// use bibauthors::prelude::*;
///
/// fn fails() -> Result<(), BibError> { Err(BibError::Config("nope".into())) }
/// assert!(fails().is_err());
/// ```
pub mod prelude {
  pub use crate::{error::BibError, separator::SeparatorPolicy};
}
