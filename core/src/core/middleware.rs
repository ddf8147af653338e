// branchware/src/core/middleware.rs

//! Defines the `Middleware` trait: the contract shared by leaf transformation
//! steps and nested branch controllers.

use crate::core::context_data::ContextData;
use crate::core::file_set::{FileRecord, FileSet};
use crate::error::BranchError;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed step closure.
///
/// A handler is an asynchronous function that receives the working file set and
/// the host context (both cheap `ContextData` clones) and resolves once its work is done.
///
/// Handlers are responsible for:
/// 1. Acquiring locks (`.read()` or `.write()`) to access or modify files and metadata.
/// 2. **Crucially, ensuring that lock guards are dropped BEFORE any `.await` suspension point.**
/// 3. Signalling deletion of a file by removing its key from the working set.
pub type Handler<F, M, Err> = Box<
  dyn Fn(ContextData<FileSet<F>>, ContextData<M>) -> Pin<Box<dyn Future<Output = Result<(), Err>> + Send>>
    + Send
    + Sync,
>;

/// One unit of work in a pipeline.
///
/// `F` is the file record type, `M` the host context (metadata) type and `Err`
/// the error type the whole pipeline reports. A step may add, remove or modify
/// keys of `files` freely; it completes exactly once by resolving its future.
#[async_trait]
pub trait Middleware<F, M, Err>: Send + Sync
where
  F: FileRecord,
  M: Send + Sync + 'static,
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  /// Name used in diagnostics.
  fn name(&self) -> &str;

  async fn call(&self, files: ContextData<FileSet<F>>, meta: ContextData<M>) -> Result<(), Err>;
}
