//! The record expansion scan.
//!
//! An [`Expander`] reads CSV records one at a time, pulls the key and authors
//! fields out of each, splits the authors and yields one [`AuthorPair`] per
//! name. Nothing beyond the current row is held in memory and the scan stops
//! at the first error. A blank line is a row with no fields, so it stops the
//! scan with a shape error like any other short row.
//!
//! # Examples
//!
//! ```
//! use bibauthors::{Config, Expander};
//!
//! let input = "k1,title,year,Alice; Bob; Carol\nk2,other,year,Dave\n";
//! let expander = Expander::new(Config::default());
//!
//! let mut output = Vec::new();
//! let written = expander.write_pairs(expander.pairs(input.as_bytes()), &mut output).unwrap();
//!
//! assert_eq!(written, 4);
//! assert_eq!(String::from_utf8(output).unwrap(), "k1 Alice\nk1 Bob\nk1 Carol\nk2 Dave\n");
//! ```

use std::iter::FusedIterator;

use super::*;

/// Expands CSV records into [`AuthorPair`]s according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Expander {
  /// Layout and policy used for every run
  config: Config,
}

/// Lazy iterator over the author pairs of a CSV source.
///
/// Yields pairs in row order, and within a row in split order. After the
/// first error it yields nothing more. The underlying reader is owned by the
/// iterator and released when it is dropped.
pub struct AuthorPairs<R> {
  /// Parsed records of the source
  records: csv::StringRecordsIntoIter<BlankLines<R>>,
  /// Layout and policy of the run
  config:  Config,
  /// Pairs of the current row not yet yielded
  pending: std::vec::IntoIter<AuthorPair>,
  /// Rows expanded so far
  rows:    u64,
  /// Pairs yielded so far
  pairs:   u64,
  /// Set once the source is exhausted or an error was yielded
  done:    bool,
}

impl Expander {
  /// Creates an expander for the given configuration.
  pub fn new(config: Config) -> Self { Self { config } }

  /// Returns the configuration this expander runs with.
  pub fn config(&self) -> &Config { &self.config }

  /// Starts a scan over CSV data read from `reader`.
  pub fn pairs<R: Read>(&self, reader: R) -> AuthorPairs<R> {
    let records = csv::ReaderBuilder::new()
      .has_headers(self.config.has_headers)
      .flexible(true)
      .from_reader(BlankLines::new(reader))
      .into_records();

    AuthorPairs {
      records,
      config: self.config.clone(),
      pending: Vec::new().into_iter(),
      rows: 0,
      pairs: 0,
      done: false,
    }
  }

  /// Opens the file at `path` and starts a scan over it.
  ///
  /// # Errors
  ///
  /// Returns [`BibError::Io`] if the file does not exist or cannot be opened.
  pub fn pairs_from_path(&self, path: impl AsRef<Path>) -> Result<AuthorPairs<File>> {
    let path = path.as_ref();
    debug!("Opening {} (separator: {})", path.display(), self.config.separator);
    let file = File::open(path)?;
    Ok(self.pairs(file))
  }

  /// Writes every pair of a scan to `writer`, one per line, and returns how
  /// many were written.
  ///
  /// Key and author are joined by the configured output delimiter. On the
  /// first error the lines written so far are flushed and the error is
  /// returned; no marker is written.
  pub fn write_pairs<R: Read, W: Write>(
    &self,
    mut pairs: AuthorPairs<R>,
    writer: W,
  ) -> Result<u64> {
    let delimiter = &self.config.output_delimiter;
    let mut writer = io::BufWriter::new(writer);
    let mut written = 0;

    for pair in pairs.by_ref() {
      let pair = match pair {
        Ok(pair) => pair,
        Err(e) => {
          writer.flush()?;
          return Err(e);
        },
      };
      writeln!(writer, "{}", pair.render(delimiter))?;
      written += 1;
    }
    trace!("Wrote {written} of {} pair(s)", pairs.pairs_yielded());

    writer.flush()?;
    Ok(written)
  }

  /// Expands the file at `path` into `writer`.
  ///
  /// This is the whole run: open, scan, print, close. It returns the number
  /// of lines written.
  pub fn run(&self, path: impl AsRef<Path>, writer: impl Write) -> Result<u64> {
    let pairs = self.pairs_from_path(path)?;
    self.write_pairs(pairs, writer)
  }
}

impl<R> AuthorPairs<R> {
  /// Number of rows expanded so far.
  pub fn rows_read(&self) -> u64 { self.rows }

  /// Number of pairs yielded so far.
  pub fn pairs_yielded(&self) -> u64 { self.pairs }

  /// Ends the scan, logging the given error, and hands it back.
  fn fail(&mut self, error: BibError) -> Option<Result<AuthorPair>> {
    self.done = true;
    warn!("Aborting after {} row(s): {error}", self.rows);
    Some(Err(error))
  }
}

impl<R: Read> AuthorPairs<R> {
  /// Returns the shape error for a blank line the csv reader skipped before
  /// reaching line `before`.
  fn skipped_blank_line(&self, before: u64) -> Option<BibError> {
    self.records.reader().get_ref().first_blank.filter(|&line| line < before).map(|line| {
      BibError::Shape { line, found: 0, required: self.config.required_fields() }
    })
  }
}

impl<R: Read> Iterator for AuthorPairs<R> {
  type Item = Result<AuthorPair>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(pair) = self.pending.next() {
        self.pairs += 1;
        return Some(Ok(pair));
      }
      if self.done {
        return None;
      }

      let record = match self.records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => return self.fail(e.into()),
        None => {
          if let Some(error) = self.skipped_blank_line(u64::MAX) {
            return self.fail(error);
          }
          self.done = true;
          debug!("Expanded {} row(s) into {} pair(s)", self.rows, self.pairs_yielded());
          return None;
        },
      };

      // Everything before the reader's position has been consumed, so a blank
      // line there came before this record.
      if let Some(error) = self.skipped_blank_line(self.records.reader().position().line()) {
        return self.fail(error);
      }

      let row = match Row::from_record(&record, &self.config) {
        Ok(row) => row,
        Err(e) => return self.fail(e),
      };
      trace!("Expanding row on line {} with key {:?}", row.line, row.key);
      self.rows += 1;
      self.pending = row
        .pairs(&self.config.separator, self.config.skip_empty)
        .collect::<Vec<_>>()
        .into_iter();
    }
  }
}

impl<R: Read> FusedIterator for AuthorPairs<R> {}

impl<R> std::fmt::Debug for AuthorPairs<R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuthorPairs")
      .field("config", &self.config)
      .field("rows", &self.rows)
      .field("pairs", &self.pairs)
      .field("done", &self.done)
      .finish_non_exhaustive()
  }
}

/// Read adapter that notes the first line holding no field at all.
///
/// The csv reader drops such lines without a trace. Quoted fields may span
/// lines, so quoting is followed to tell a blank line from an empty line
/// inside a field.
struct BlankLines<R> {
  /// Source being read
  inner:         R,
  /// Line the next byte belongs to (1-based)
  line:          u64,
  /// No byte other than `\r` seen on the current line yet
  line_empty:    bool,
  /// Next byte starts a field
  field_start:   bool,
  /// Inside a quoted field
  in_quotes:     bool,
  /// Saw a quote inside a quoted field; the next byte tells escape from close
  quote_pending: bool,
  /// First blank line seen
  first_blank:   Option<u64>,
}

impl<R> BlankLines<R> {
  /// Wraps `inner`.
  fn new(inner: R) -> Self {
    Self {
      inner,
      line: 1,
      line_empty: true,
      field_start: true,
      in_quotes: false,
      quote_pending: false,
      first_blank: None,
    }
  }

  /// Advances the line state by one byte.
  fn observe(&mut self, byte: u8) {
    if self.in_quotes {
      if !self.quote_pending {
        match byte {
          b'"' => self.quote_pending = true,
          b'\n' => self.line += 1,
          _ => {},
        }
        return;
      }
      self.quote_pending = false;
      if byte == b'"' {
        return;
      }
      self.in_quotes = false;
    }

    match byte {
      b'\n' => {
        if self.line_empty && self.first_blank.is_none() {
          self.first_blank = Some(self.line);
        }
        self.line += 1;
        self.line_empty = true;
        self.field_start = true;
      },
      b'\r' => {},
      b'"' if self.field_start => {
        self.in_quotes = true;
        self.line_empty = false;
        self.field_start = false;
      },
      b',' => {
        self.line_empty = false;
        self.field_start = true;
      },
      _ => {
        self.line_empty = false;
        self.field_start = false;
      },
    }
  }
}

impl<R: Read> Read for BlankLines<R> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let read = self.inner.read(buf)?;
    for &byte in &buf[..read] {
      self.observe(byte);
    }
    Ok(read)
  }
}
