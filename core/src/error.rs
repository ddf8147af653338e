// branchware/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BranchError {
  /// The pattern-matching capability rejected a pattern (e.g. malformed glob).
  #[error("Pattern '{pattern}' could not be evaluated. Source: {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Step '{step_name}' failed. Source: {source}")]
  StepFailed {
    step_name: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Error in user-provided step or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl BranchError {
  /// Wraps an arbitrary failure as the failure of a named step.
  pub fn step_failed(step_name: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
    BranchError::StepFailed {
      step_name: step_name.into(),
      source: source.into(),
    }
  }
}

// Conversion for steps written against `anyhow::Result`.
impl From<AnyhowError> for BranchError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a BranchError that went through anyhow instead of nesting it.
    match err.downcast::<BranchError>() {
      Ok(branch_err) => branch_err,
      Err(source) => BranchError::HandlerError { source },
    }
  }
}

pub type BranchResult<T, E = BranchError> = std::result::Result<T, E>;
