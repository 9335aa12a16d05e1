//! Command line interface for the bibauthors record expander.
//!
//! Reads a CSV file of bibliographic records and prints one line per
//! `(key, author)` pair, splitting each record's authors field.
//!
//! # Usage
//!
//! ```bash
//! # Split on "; " and print "key author" lines
//! display-authors records.csv
//!
//! # Split on a bare ";" and print tab-separated lines
//! display-authors --separator semicolon --delimiter '\t' records.csv
//!
//! # Authors in column 2, first row is a header
//! display-authors --authors-column 2 --has-headers records.csv
//! ```
//!
//! Options not given on the command line are taken from a config file, when
//! one is named with `--config` or `--user-config`, and then from the built-in
//! defaults. Without those flags no file is read. Logs go to stderr, so stdout
//! carries only pairs.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{io, path::PathBuf};

use bibauthors::{error::Result, prelude::*, Config, Expander};
use clap::{builder::ArgAction, Parser};
use console::style;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(author, version, about = "Print one line per (key, author) pair of a bibliographic CSV file")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// CSV file of bibliographic records
  path: PathBuf,

  /// How the authors field is split: "semicolon", "semicolon-space", or any other literal
  #[arg(short, long)]
  separator: Option<SeparatorPolicy>,

  /// Zero-based column holding the record key
  #[arg(long)]
  key_column: Option<usize>,

  /// Zero-based column holding the authors field
  #[arg(long)]
  authors_column: Option<usize>,

  /// Written between key and author on each line; "\t" is read as a tab
  #[arg(short, long)]
  delimiter: Option<String>,

  /// Skip the first row as a header
  #[arg(long)]
  has_headers: bool,

  /// Drop empty author names instead of printing them
  #[arg(long)]
  skip_empty: bool,

  /// TOML config file to read options from
  #[arg(short, long, conflicts_with = "user_config")]
  config: Option<PathBuf>,

  /// Read options from the config file in the platform-specific config directory
  #[arg(long)]
  user_config: bool,
}

impl Cli {
  /// Builds the run configuration: flags over config file over defaults.
  fn config(&self) -> Result<Config> {
    let path = self.config.clone().or_else(|| self.user_config.then(Config::default_path));
    let mut config = Config::load(path.as_deref())?;

    if let Some(separator) = &self.separator {
      config = config.with_separator(separator.clone());
    }
    if let Some(column) = self.key_column {
      config = config.with_key_column(column);
    }
    if let Some(column) = self.authors_column {
      config = config.with_authors_column(column);
    }
    if let Some(delimiter) = &self.delimiter {
      config = config.with_output_delimiter(delimiter.replace("\\t", "\t"));
    }
    if self.has_headers {
      config = config.with_headers(true);
    }
    if self.skip_empty {
      config = config.with_skip_empty(true);
    }

    config.validate()?;
    debug!("Running with {config:?}");
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Expands the input file onto stdout and returns the number of lines printed.
fn run(cli: &Cli) -> Result<u64> {
  let expander = Expander::new(cli.config()?);
  let stdout = io::stdout();
  match expander.run(&cli.path, stdout.lock()) {
    // The reader went away (e.g. `| head`); nothing left to do.
    Err(BibError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
      debug!("Output closed early: {e}");
      Ok(0)
    },
    result => result,
  }
}

/// Entry point for the display-authors CLI
///
/// Exits with status 0 after a complete scan. Any error (missing or
/// unreadable file, malformed CSV, a row that is too short, a bad option)
/// aborts the scan, is printed to stderr and exits with status 1. Lines
/// printed before the error are left as they are.
fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match run(&cli) {
    Ok(written) => info!("Printed {written} pair(s) from {}", cli.path.display()),
    Err(e) => {
      eprintln!("{}{e}", style(ERROR_PREFIX).for_stderr().red());
      std::process::exit(1);
    },
  }
}
