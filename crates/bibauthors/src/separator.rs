//! Separator policies for splitting an authors field into author names.
//!
//! Bibliographic exports disagree on how authors are joined. Some write
//! `"Alice;Bob"`, others `"Alice; Bob"`. A [`SeparatorPolicy`] names the exact
//! literal a field is split on. Splitting is a plain substring split with no
//! trimming, so the policy must match the data:
//!
//! ```
//! use bibauthors::SeparatorPolicy;
//!
//! let field = "A; B;C";
//! let bare: Vec<_> = SeparatorPolicy::Semicolon.split(field).collect();
//! assert_eq!(bare, ["A", " B", "C"]);
//!
//! let spaced: Vec<_> = SeparatorPolicy::SemicolonSpace.split(field).collect();
//! assert_eq!(spaced, ["A", "B;C"]);
//! ```

use super::*;

/// The literal used to split an authors field.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
///
/// use bibauthors::SeparatorPolicy;
///
/// assert_eq!(SeparatorPolicy::from_str("semicolon").unwrap(), SeparatorPolicy::Semicolon);
/// assert_eq!(SeparatorPolicy::from_str("; ").unwrap(), SeparatorPolicy::SemicolonSpace);
/// assert_eq!(SeparatorPolicy::from_str(" and ").unwrap(), SeparatorPolicy::Custom(" and ".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeparatorPolicy {
  /// Split on a bare `";"`. Names after the first keep any leading space.
  Semicolon,
  /// Split on `"; "`. Names separated by a bare `";"` stay joined.
  #[default]
  SemicolonSpace,
  /// Split on an arbitrary non-empty literal.
  Custom(String),
}

impl SeparatorPolicy {
  /// Returns the literal this policy splits on.
  pub fn as_str(&self) -> &str {
    match self {
      SeparatorPolicy::Semicolon => ";",
      SeparatorPolicy::SemicolonSpace => "; ",
      SeparatorPolicy::Custom(separator) => separator,
    }
  }

  /// Splits `field` into author names, in order.
  ///
  /// An empty field yields a single empty name.
  pub fn split<'a>(&'a self, field: &'a str) -> std::str::Split<'a, &'a str> {
    field.split(self.as_str())
  }
}

impl Display for SeparatorPolicy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SeparatorPolicy::Semicolon => write!(f, "semicolon"),
      SeparatorPolicy::SemicolonSpace => write!(f, "semicolon-space"),
      SeparatorPolicy::Custom(separator) => write!(f, "{separator}"),
    }
  }
}

impl FromStr for SeparatorPolicy {
  type Err = BibError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "" => Err(BibError::Config("Separator must not be empty".to_string())),
      "semicolon" | "bare" | ";" => Ok(SeparatorPolicy::Semicolon),
      "semicolon-space" | "spaced" | "; " => Ok(SeparatorPolicy::SemicolonSpace),
      s => Ok(SeparatorPolicy::Custom(s.to_owned())),
    }
  }
}

impl TryFrom<String> for SeparatorPolicy {
  type Error = BibError;

  fn try_from(value: String) -> Result<Self> { value.parse() }
}

impl From<SeparatorPolicy> for String {
  fn from(policy: SeparatorPolicy) -> Self { policy.to_string() }
}
