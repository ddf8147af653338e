// branchware/src/pipeline/definition.rs

//! Contains the `Pipeline<F, M, Err>` struct definition and methods for its construction.

use crate::branch::controller::Branch;
use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::core::middleware::Middleware;
use crate::error::BranchError;
use crate::pipeline::transform::Transform;
use std::future::Future;
use std::sync::Arc;

/// A sequential middleware runner.
///
/// `F` is the file record type, `M` the host context type. `Err` is the error type
/// every step reports; it must be `From<BranchError>` so framework failures (e.g. a
/// rejected pattern inside a nested branch) can surface through it.
///
/// The same type serves as the sub-pipeline inside a [`Branch`] and as a minimal
/// host pipeline for top-level builds.
pub struct Pipeline<F, M, Err = BranchError>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  /// Steps in registration order.
  pub(crate) steps: Vec<Arc<dyn Middleware<F, M, Err>>>,
}

impl<F, M, Err> Pipeline<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  /// Creates an empty pipeline.
  pub fn new() -> Self {
    Self { steps: Vec::new() }
  }

  /// Appends a step. Steps execute in registration order.
  pub fn use_step(&mut self, step: impl Middleware<F, M, Err> + 'static) -> &mut Self {
    self.steps.push(Arc::new(step));
    self
  }

  /// Appends a step that is shared with other pipelines.
  pub fn use_shared(&mut self, step: Arc<dyn Middleware<F, M, Err>>) -> &mut Self {
    self.steps.push(step);
    self
  }

  /// Appends a leaf transformation built from an async closure.
  ///
  /// The closure's error type only needs to convert into the pipeline's `Err`.
  pub fn transform<Fut, UserErr>(
    &mut self,
    name: impl Into<String>,
    handler_fn: impl Fn(ContextData<FileSet<F>>, ContextData<M>) -> Fut + Send + Sync + 'static,
  ) -> &mut Self
  where
    Fut: Future<Output = Result<(), UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.use_step(Transform::new(name, handler_fn))
  }

  /// Appends a branch controller as a step.
  pub fn branch(&mut self, branch: Branch<F, M, Err>) -> &mut Self {
    self.use_step(branch)
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Names of the registered steps, in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name()).collect()
  }
}

impl<F, M, Err> Default for Pipeline<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<F, M, Err> std::fmt::Debug for Pipeline<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline").field("steps", &self.step_names()).finish()
  }
}
