//! Rows extracted from CSV records and the author pairs they expand into.

use super::*;

/// The two fields of a CSV record that matter for expansion.
///
/// A row is built from one parsed record, turned into zero or more
/// [`AuthorPair`]s and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  /// Line the record starts on (1-based)
  pub line:    u64,
  /// Opaque record identifier
  pub key:     String,
  /// All author names of the record, joined by a separator
  pub authors: String,
}

/// One line of output: a record key and one of its authors.
///
/// # Examples
///
/// ```
/// use bibauthors::AuthorPair;
///
/// let pair = AuthorPair { key: "k1".into(), author: "Alice".into() };
/// assert_eq!(pair.to_string(), "k1 Alice");
/// assert_eq!(pair.render("\t"), "k1\tAlice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorPair {
  /// Key of the record the author belongs to
  pub key:    String,
  /// A single author name, exactly as split from the authors field
  pub author: String,
}

impl Row {
  /// Extracts the key and authors fields of `record` using the columns in
  /// `config`.
  ///
  /// # Errors
  ///
  /// Returns [`BibError::Shape`] if the record is too short to contain both
  /// columns.
  pub fn from_record(record: &csv::StringRecord, config: &Config) -> Result<Self> {
    let line = record.position().map(|position| position.line()).unwrap_or_default();
    let shape_error = || BibError::Shape {
      line,
      found: record.len(),
      required: config.required_fields(),
    };

    let key = record.get(config.key_column).ok_or_else(shape_error)?;
    let authors = record.get(config.authors_column).ok_or_else(shape_error)?;

    Ok(Self { line, key: key.to_owned(), authors: authors.to_owned() })
  }

  /// Expands this row into one pair per author, in split order.
  ///
  /// With `skip_empty` set, empty names (from an empty field or doubled
  /// separators) produce no pair.
  pub fn pairs<'a>(
    &'a self,
    policy: &'a SeparatorPolicy,
    skip_empty: bool,
  ) -> impl Iterator<Item = AuthorPair> + 'a {
    policy
      .split(&self.authors)
      .filter(move |author| !(skip_empty && author.is_empty()))
      .map(move |author| AuthorPair { key: self.key.clone(), author: author.to_owned() })
  }
}

impl AuthorPair {
  /// Renders the pair as a single line body, key and author joined by
  /// `delimiter`.
  pub fn render(&self, delimiter: &str) -> String {
    format!("{}{delimiter}{}", self.key, self.author)
  }
}

impl Display for AuthorPair {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.render(" "))
  }
}
