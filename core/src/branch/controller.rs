// branchware/src/branch/controller.rs

//! The `Branch` controller.

use crate::branch::builder::BranchBuilder;
use crate::branch::selector::Selector;
use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::core::middleware::Middleware;
use crate::error::BranchError;
use crate::pipeline::Pipeline;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// A predicate-scoped sub-pipeline.
///
/// Built once through [`BranchBuilder`] and immutable afterwards. Cloning is cheap
/// and clones share the same steps. Nothing from one invocation is retained for
/// the next.
///
/// ```ignore
/// let md = Branch::builder()
///   .glob("*.md")
///   .transform("markdown", render_markdown)
///   .branch(Branch::builder().glob("special/*").transform("post", post_process).build())
///   .build();
/// host.branch(md);
/// ```
pub struct Branch<F, M, Err = BranchError>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  name: String,
  selector: Arc<Selector<F>>,
  pipeline: Arc<Pipeline<F, M, Err>>,
}

impl<F, M, Err> Branch<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  pub fn builder() -> BranchBuilder<F, M, Err> {
    BranchBuilder::new()
  }

  pub(crate) fn from_parts(name: String, selector: Arc<Selector<F>>, pipeline: Arc<Pipeline<F, M, Err>>) -> Self {
    Self { name, selector, pipeline }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn selector(&self) -> &Selector<F> {
    &self.selector
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.pipeline.step_names()
  }

  /// Runs the branch's steps over the files its selector picks from `files`,
  /// merging each step's results back into `files` as soon as that step completes.
  ///
  /// Afterwards, files that were never selected are untouched, selected files
  /// hold whatever the steps left, files the steps removed are gone and files
  /// the steps created are appended.
  ///
  /// On error the remaining steps are skipped and the error is returned as is.
  /// Steps that completed before the failure stay reconciled into `files`; the
  /// failing step's partial work is discarded. There is no rollback.
  #[instrument(
        name = "Branch::invoke",
        skip_all,
        fields(branch = %self.name, num_steps = self.pipeline.len()),
        err(Display)
    )]
  pub async fn invoke(&self, files: ContextData<FileSet<F>>, meta: ContextData<M>) -> Result<(), Err> {
    event!(Level::DEBUG, "Branch invoked.");
    self.pipeline.run(files, meta).await
  }
}

impl<F, M, Err> Clone for Branch<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      name: self.name.clone(),
      selector: Arc::clone(&self.selector),
      pipeline: Arc::clone(&self.pipeline),
    }
  }
}

impl<F, M, Err> std::fmt::Debug for Branch<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Branch")
      .field("name", &self.name)
      .field("selector", &self.selector)
      .field("steps", &self.step_names())
      .finish()
  }
}

#[async_trait]
impl<F, M, Err> Middleware<F, M, Err> for Branch<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn name(&self) -> &str {
    &self.name
  }

  async fn call(&self, files: ContextData<FileSet<F>>, meta: ContextData<M>) -> Result<(), Err> {
    self.invoke(files, meta).await
  }
}
