// branchware/src/branch/reconcile.rs

//! Merging a branch's working set back into the enclosing file set.

use crate::core::file_set::{FileRecord, FileSet};

/// What happened to one path during a branch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange<F> {
  /// Selected and returned unchanged.
  Kept,
  /// Selected and returned with a different record.
  Updated(F),
  /// Not selected, but present after the step. Overwrites an unselected file of
  /// the same path, if any.
  Added(F),
  /// Selected, and removed by the step.
  Deleted,
}

/// Counts per change kind, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
  pub kept: usize,
  pub updated: usize,
  pub added: usize,
  pub deleted: usize,
}

/// The explicit outcome of a select → run pass, one entry per affected path.
///
/// Deletions come first (in pre-run order), followed by every surviving or new
/// path in working-set order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<F> {
  changes: Vec<(String, FileChange<F>)>,
}

impl<F: FileRecord> Reconciliation<F> {
  /// Diffs the selection handed to a step (`before`) against what the step left
  /// in its working set (`after`).
  pub fn compute(before: &FileSet<F>, after: FileSet<F>) -> Self {
    let mut changes = Vec::with_capacity(before.len().max(after.len()));

    for path in before.keys() {
      if !after.contains_key(path) {
        changes.push((path.clone(), FileChange::Deleted));
      }
    }

    for (path, record) in after {
      let change = match before.get(&path) {
        Some(previous) if *previous == record => FileChange::Kept,
        Some(_) => FileChange::Updated(record),
        None => FileChange::Added(record),
      };
      changes.push((path, change));
    }

    Self { changes }
  }

  pub fn changes(&self) -> &[(String, FileChange<F>)] {
    &self.changes
  }

  pub fn get(&self, path: &str) -> Option<&FileChange<F>> {
    self.changes.iter().find(|(p, _)| p == path).map(|(_, change)| change)
  }

  pub fn stats(&self) -> ReconcileStats {
    let mut stats = ReconcileStats::default();
    for (_, change) in &self.changes {
      match change {
        FileChange::Kept => stats.kept += 1,
        FileChange::Updated(_) => stats.updated += 1,
        FileChange::Added(_) => stats.added += 1,
        FileChange::Deleted => stats.deleted += 1,
      }
    }
    stats
  }

  /// True when applying would leave the target untouched.
  pub fn is_noop(&self) -> bool {
    self.changes.iter().all(|(_, change)| matches!(change, FileChange::Kept))
  }

  /// Applies the changes to `files`.
  ///
  /// Updated paths keep their position, added paths are appended, deleted paths
  /// are removed without disturbing the order of the rest.
  pub fn apply(self, files: &mut FileSet<F>) -> ReconcileStats {
    let stats = self.stats();
    for (path, change) in self.changes {
      match change {
        FileChange::Kept => {}
        FileChange::Updated(record) | FileChange::Added(record) => {
          files.insert(path, record);
        }
        FileChange::Deleted => {
          files.shift_remove(&path);
        }
      }
    }
    stats
  }
}
