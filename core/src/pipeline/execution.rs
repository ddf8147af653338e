// branchware/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, responsible for executing the pipeline's steps.

use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::error::BranchError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl<F, M, Err> Pipeline<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  /// Executes the steps in order against `files`.
  ///
  /// Each step sees the file set as left by the previous one; nothing is
  /// snapshotted between steps. The first error is returned immediately and the
  /// remaining steps never run. Effects of steps that already completed are kept:
  /// there is no rollback.
  ///
  /// There is no cancellation either. A step that never completes keeps the
  /// returned future pending forever.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            file_record_type = %std::any::type_name::<F>(),
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, files: ContextData<FileSet<F>>, meta: ContextData<M>) -> Result<(), Err> {
    let num_files = files.read().len();
    event!(Level::DEBUG, num_files, "Pipeline execution starting.");

    for (step_idx, step) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step.name(),
        step_index = step_idx
      );

      if let Err(e) = step.call(files.clone(), meta.clone()).instrument(step_span).await {
        event!(
          Level::ERROR,
          step_name = step.name(),
          step_index = step_idx,
          skipped = self.steps.len() - step_idx - 1,
          error = %e,
          "Step failed, skipping remaining steps."
        );
        return Err(e);
      }
      event!(Level::TRACE, step_name = step.name(), "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(())
  }
}
