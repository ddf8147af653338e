// branchware/src/branch/mod.rs

//! The branch controller: run a nested pipeline over the files a selector picks,
//! then merge the results back into the enclosing file set.
//!
//! Every step of a branch goes through its own select → run → reconcile cycle
//! (see [`isolated`]), so a nested branch always observes a file set that the
//! previous step has already been reconciled into.

pub mod builder;
pub mod controller;
#[cfg(feature = "glob")]
pub mod glob;
pub(crate) mod isolated;
pub mod reconcile;
pub mod selector;

pub use builder::BranchBuilder;
pub use controller::Branch;
#[cfg(feature = "glob")]
pub use glob::GlobMatcher;
pub use reconcile::{FileChange, ReconcileStats, Reconciliation};
pub use selector::{Pattern, PatternMatcher, Predicate, Selector};
