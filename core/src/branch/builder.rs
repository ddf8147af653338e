// branchware/src/branch/builder.rs

//! Fluent builder for [`Branch`]. All configuration is fixed by `build()`.

use crate::branch::controller::Branch;
use crate::branch::isolated::Isolated;
use crate::branch::selector::{Pattern, PatternMatcher, Selector};
use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::core::middleware::Middleware;
use crate::error::BranchError;
use crate::pipeline::{Pipeline, Transform};
use std::future::Future;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Builder for a [`Branch`].
///
/// `filter`, `pattern` and `matching` replace each other: the last call decides
/// the selector. Steps run in the order they were added.
pub struct BranchBuilder<F, M, Err = BranchError>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  name: Option<String>,
  selector: Selector<F>,
  steps: Vec<Arc<dyn Middleware<F, M, Err>>>,
}

impl<F, M, Err> BranchBuilder<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  /// Starts a branch that selects every file.
  pub fn new() -> Self {
    Self {
      name: None,
      selector: Selector::All,
      steps: Vec::new(),
    }
  }

  /// Overrides the name used in diagnostics. Defaults to `branch(<selector>)`.
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Selects files with a `(path, record, index)` predicate.
  pub fn filter(self, predicate: impl Fn(&str, &F, usize) -> bool + Send + Sync + 'static) -> Self {
    self.matching(Selector::filter(predicate))
  }

  /// Selects files whose path `matcher` matches against `pattern`.
  pub fn pattern(self, matcher: impl PatternMatcher, pattern: impl Into<Pattern>) -> Self {
    self.matching(Selector::pattern(matcher, pattern))
  }

  /// Selects files whose path matches the glob list, e.g. `["**/*.md", "!drafts/**"]`.
  #[cfg(feature = "glob")]
  pub fn glob(self, pattern: impl Into<Pattern>) -> Self {
    self.matching(Selector::glob(pattern))
  }

  pub fn matching(mut self, selector: Selector<F>) -> Self {
    self.selector = selector;
    self
  }

  pub fn use_step(self, step: impl Middleware<F, M, Err> + 'static) -> Self {
    self.use_shared(Arc::new(step))
  }

  pub fn use_shared(mut self, step: Arc<dyn Middleware<F, M, Err>>) -> Self {
    self.steps.push(step);
    self
  }

  /// Adds a leaf transformation built from an async closure.
  pub fn transform<Fut, UserErr>(
    self,
    name: impl Into<String>,
    handler_fn: impl Fn(ContextData<FileSet<F>>, ContextData<M>) -> Fut + Send + Sync + 'static,
  ) -> Self
  where
    Fut: Future<Output = Result<(), UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.use_step(Transform::new(name, handler_fn))
  }

  /// Nests another branch as the next step.
  pub fn branch(self, branch: Branch<F, M, Err>) -> Self {
    self.use_step(branch)
  }

  /// Freezes the configuration. Every step is wrapped in its own
  /// select → run → reconcile cycle sharing this branch's selector.
  #[instrument(
        name = "BranchBuilder::build",
        skip_all,
        fields(selector = %self.selector, num_steps = self.steps.len())
    )]
  pub fn build(self) -> Branch<F, M, Err> {
    let name = self.name.unwrap_or_else(|| format!("branch({})", self.selector));
    let selector = Arc::new(self.selector);

    let mut pipeline = Pipeline::new();
    for step in self.steps {
      pipeline.use_step(Isolated::new(Arc::clone(&selector), step));
    }

    event!(Level::DEBUG, branch = %name, "Branch configured.");
    Branch::from_parts(name, selector, Arc::new(pipeline))
  }
}

impl<F, M, Err> Default for BranchBuilder<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
