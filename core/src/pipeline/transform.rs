// branchware/src/pipeline/transform.rs

//! The leaf `Middleware`: a named async closure over the working file set.

use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::core::middleware::{Handler, Middleware};
use crate::error::BranchError;
use async_trait::async_trait;
use std::future::Future;

pub struct Transform<F, M, Err = BranchError>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  name: String,
  handler: Handler<F, M, Err>,
}

impl<F, M, Err> Transform<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  /// Wraps `handler_fn`, converting its error into the pipeline's `Err`.
  pub fn new<Fut, UserErr>(
    name: impl Into<String>,
    handler_fn: impl Fn(ContextData<FileSet<F>>, ContextData<M>) -> Fut + Send + Sync + 'static,
  ) -> Self
  where
    Fut: Future<Output = Result<(), UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler: Handler<F, M, Err> = Box::new(move |files, meta| {
      let user_fut = handler_fn(files, meta);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    Self::from_handler(name, handler)
  }

  /// Uses an already boxed handler as is.
  pub fn from_handler(name: impl Into<String>, handler: Handler<F, M, Err>) -> Self {
    Self {
      name: name.into(),
      handler,
    }
  }
}

#[async_trait]
impl<F, M, Err> Middleware<F, M, Err> for Transform<F, M, Err>
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  fn name(&self) -> &str {
    &self.name
  }

  async fn call(&self, files: ContextData<FileSet<F>>, meta: ContextData<M>) -> Result<(), Err> {
    (self.handler)(files, meta).await
  }
}
