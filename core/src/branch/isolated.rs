// branchware/src/branch/isolated.rs

//! Per-step select → run → reconcile wrapper.
//!
//! A branch does not filter once around its whole sub-pipeline. Each step is
//! wrapped here instead, so the selection is recomputed from the enclosing set
//! right before the step and merged back right after it completes. When the
//! wrapped step is itself a branch, its own reconciliation has finished before
//! this one starts, whatever the nesting depth.

use crate::branch::reconcile::Reconciliation;
use crate::branch::selector::Selector;
use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::core::middleware::Middleware;
use crate::error::BranchError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub(crate) struct Isolated<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  selector: Arc<Selector<F>>,
  inner: Arc<dyn Middleware<F, M, Err>>,
}

impl<F, M, Err> Isolated<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  pub(crate) fn new(selector: Arc<Selector<F>>, inner: Arc<dyn Middleware<F, M, Err>>) -> Self {
    Self { selector, inner }
  }
}

#[async_trait]
impl<F, M, Err> Middleware<F, M, Err> for Isolated<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn name(&self) -> &str {
    self.inner.name()
  }

  #[instrument(
        name = "Isolated::call",
        skip_all,
        fields(step_name = %self.inner.name(), selector = %self.selector),
        err(Display)
    )]
  async fn call(&self, files: ContextData<FileSet<F>>, meta: ContextData<M>) -> Result<(), Err> {
    // 1. Select against the set as it is right now. The guard is released
    //    before the step is awaited.
    let before = {
      let guard = files.read();
      let selected = self.selector.select(&guard).map_err(Err::from)?;
      event!(Level::DEBUG, total = guard.len(), selected = selected.len(), "Selection computed.");
      selected
    };

    // 2. Run the step on its own copy. On failure the copy is dropped and the
    //    enclosing set keeps whatever earlier steps reconciled into it.
    let working = ContextData::new(before.clone());
    if let Err(e) = self.inner.call(working.clone(), meta).await {
      event!(Level::ERROR, error = %e, "Step failed, its working set is discarded.");
      return Err(e);
    }

    // 3. Merge back.
    let reconciliation = Reconciliation::compute(&before, working.take());
    let stats = reconciliation.apply(&mut files.write());
    event!(
      Level::DEBUG,
      kept = stats.kept,
      updated = stats.updated,
      added = stats.added,
      deleted = stats.deleted,
      "Working set reconciled."
    );
    Ok(())
  }
}
