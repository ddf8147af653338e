// src/lib.rs

//! Branchware: branching middleware for ASYNC file-processing pipelines.
//!
//! A build pushes an in-memory file set (path → record) through a chain of
//! middleware steps. A [`Branch`] picks a subset of that set, runs its own nested
//! steps over the subset and merges the outcome (updated, added and removed files)
//! back into the full set. Features:
//!  - Selection by `(path, record, index)` predicate or by path pattern. Any
//!    [`PatternMatcher`] can be plugged in; the `glob` feature (on by default)
//!    provides `GlobMatcher` and `BranchBuilder::glob`.
//!  - Steps are leaf transformations or further branches, nested to any depth.
//!  - Every branch step runs in its own select → run → reconcile cycle, so nested
//!    branches always merge in step order.
//!  - Reconciliation is an explicit per-path result (`Kept`, `Updated`, `Added`,
//!    `Deleted`) before it is applied.
//!  - Sequential execution, first error wins, no rollback.

pub mod branch;
pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::context_data::ContextData;
pub use crate::core::file_set::{FileRecord, FileSet};
pub use crate::core::middleware::{Handler, Middleware};

pub use crate::pipeline::{Pipeline, Transform};

pub use crate::branch::{
  Branch, BranchBuilder, FileChange, Pattern, PatternMatcher, Predicate, ReconcileStats, Reconciliation, Selector,
};

#[cfg(feature = "glob")]
pub use crate::branch::GlobMatcher;

pub use crate::error::{BranchError, BranchResult};

/*
    Core Workflow:
    1. Pick a record type `F` for files (anything `Clone + PartialEq + Send + Sync`)
       and a host context type `M` for build-wide metadata.
    2. Build branches with `Branch::builder()`:
       - `.glob("*.md")`, `.pattern(matcher, "*.md")` or `.filter(|path, file, idx| ...)` to select files.
       - `.transform("name", |files, meta| async move { ... })` for leaf steps.
       - `.branch(other_branch)` to nest.
       - `.build()` to freeze.
    3. Add the branches to a host `Pipeline<F, M>` (or call `branch.invoke(..)` directly).
    4. Run it with `ContextData::new(file_set)` and `ContextData::new(metadata)`; read
       the results back out of the same `ContextData` handles.
*/
