// branchware/src/branch/selector.rs

//! Decides which files of a set a branch operates on.

use crate::core::file_set::{FileRecord, FileSet};
use crate::error::BranchError;
use std::fmt;
use std::sync::Arc;

/// Selection predicate: `(path, record, index_in_snapshot) -> selected`.
pub type Predicate<F> = Arc<dyn Fn(&str, &F, usize) -> bool + Send + Sync + 'static>;

/// One or more path patterns handed to a [`PatternMatcher`].
///
/// Interpretation of each entry (globs, `!` negation, ordering) belongs to the
/// matcher; this type only carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(Vec<String>);

impl Pattern {
  pub fn new<I, S>(patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Pattern(patterns.into_iter().map(Into::into).collect())
  }

  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }
}

impl From<&str> for Pattern {
  fn from(pattern: &str) -> Self {
    Pattern(vec![pattern.to_string()])
  }
}

impl From<String> for Pattern {
  fn from(pattern: String) -> Self {
    Pattern(vec![pattern])
  }
}

impl From<Vec<String>> for Pattern {
  fn from(patterns: Vec<String>) -> Self {
    Pattern(patterns)
  }
}

impl From<Vec<&str>> for Pattern {
  fn from(patterns: Vec<&str>) -> Self {
    Pattern::new(patterns)
  }
}

impl From<&[&str]> for Pattern {
  fn from(patterns: &[&str]) -> Self {
    Pattern::new(patterns.iter().copied())
  }
}

impl<const N: usize> From<[&str; N]> for Pattern {
  fn from(patterns: [&str; N]) -> Self {
    Pattern::new(patterns)
  }
}

impl fmt::Display for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.join(", "))
  }
}

/// Path-pattern matching capability, supplied by the caller.
///
/// Returns an error for patterns it cannot evaluate; the branch surfaces that
/// as [`BranchError::Pattern`].
pub trait PatternMatcher: Send + Sync + 'static {
  fn is_match(&self, path: &str, pattern: &Pattern) -> anyhow::Result<bool>;
}

impl<T> PatternMatcher for T
where
  T: Fn(&str, &Pattern) -> anyhow::Result<bool> + Send + Sync + 'static,
{
  fn is_match(&self, path: &str, pattern: &Pattern) -> anyhow::Result<bool> {
    (self)(path, pattern)
  }
}

/// How a branch picks its files.
pub enum Selector<F: FileRecord> {
  /// Every file.
  All,
  Filter(Predicate<F>),
  Pattern {
    matcher: Arc<dyn PatternMatcher>,
    pattern: Pattern,
  },
}

impl<F: FileRecord> Selector<F> {
  pub fn all() -> Self {
    Selector::All
  }

  pub fn filter(predicate: impl Fn(&str, &F, usize) -> bool + Send + Sync + 'static) -> Self {
    Selector::Filter(Arc::new(predicate))
  }

  pub fn pattern(matcher: impl PatternMatcher, pattern: impl Into<Pattern>) -> Self {
    Selector::Pattern {
      matcher: Arc::new(matcher),
      pattern: pattern.into(),
    }
  }

  /// Pattern selector using [`GlobMatcher`](crate::branch::glob::GlobMatcher).
  #[cfg(feature = "glob")]
  pub fn glob(pattern: impl Into<Pattern>) -> Self {
    Self::pattern(crate::branch::glob::GlobMatcher::new(), pattern)
  }

  /// Evaluates the selector for a single entry of a snapshot.
  pub fn is_selected(&self, path: &str, record: &F, index: usize) -> Result<bool, BranchError> {
    match self {
      Selector::All => Ok(true),
      Selector::Filter(predicate) => Ok(predicate(path, record, index)),
      Selector::Pattern { matcher, pattern } => {
        matcher
          .is_match(path, pattern)
          .map_err(|source| BranchError::Pattern {
            pattern: pattern.to_string(),
            source,
          })
      }
    }
  }

  /// Copies out `{path: record}` for every selected entry, in `files` order.
  ///
  /// `index` handed to the predicate is the entry's position in `files` at call time.
  pub fn select(&self, files: &FileSet<F>) -> Result<FileSet<F>, BranchError> {
    let mut selected = FileSet::with_capacity(files.len());
    for (index, (path, record)) in files.iter().enumerate() {
      if self.is_selected(path, record, index)? {
        selected.insert(path.clone(), record.clone());
      }
    }
    Ok(selected)
  }
}

impl<F: FileRecord> Default for Selector<F> {
  fn default() -> Self {
    Selector::All
  }
}

impl<F: FileRecord> Clone for Selector<F> {
  fn clone(&self) -> Self {
    match self {
      Selector::All => Selector::All,
      Selector::Filter(predicate) => Selector::Filter(Arc::clone(predicate)),
      Selector::Pattern { matcher, pattern } => Selector::Pattern {
        matcher: Arc::clone(matcher),
        pattern: pattern.clone(),
      },
    }
  }
}

impl<F: FileRecord> fmt::Display for Selector<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Selector::All => f.write_str("*"),
      Selector::Filter(_) => f.write_str("<filter>"),
      Selector::Pattern { pattern, .. } => write!(f, "{}", pattern),
    }
  }
}

impl<F: FileRecord> fmt::Debug for Selector<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Selector::All => f.write_str("Selector::All"),
      Selector::Filter(_) => f.write_str("Selector::Filter(..)"),
      Selector::Pattern { pattern, .. } => f.debug_struct("Selector::Pattern").field("pattern", pattern).finish(),
    }
  }
}
