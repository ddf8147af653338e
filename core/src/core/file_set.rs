// branchware/src/core/file_set.rs

//! The file set flowing through a build: path → file record.

use indexmap::IndexMap;

/// Mapping from file path to an opaque file record.
///
/// Paths are unique. Insertion order is preserved so that output stays
/// deterministic across runs; removal goes through `shift_remove` to keep it so.
pub type FileSet<F> = IndexMap<String, F>;

/// Bounds every file record type must satisfy.
///
/// `Clone` is needed to hand a branch its own working copy, `PartialEq` to tell
/// a kept file from an updated one during reconciliation.
pub trait FileRecord: Clone + PartialEq + Send + Sync + 'static {}

impl<T> FileRecord for T where T: Clone + PartialEq + Send + Sync + 'static {}
