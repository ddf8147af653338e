// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use branchware::{BranchError, ContextData, FileSet, Transform};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tracing::Level;

// --- Common Context Structs ---

/// Host context shared with every step. Steps append to `log` so tests can
/// check execution order across nesting levels.
#[derive(Clone, Debug, Default)]
pub struct Meta {
  pub log: Vec<String>,
  pub title: Option<String>,
}

pub type Files = FileSet<String>;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error)]
pub enum TestError {
  #[error("Branch framework error: {0}")]
  Branch(#[from] BranchError),

  #[error("Test step failed: {0}")]
  Step(String),
}

impl TestError {
  pub fn step_message(&self) -> Option<&str> {
    match self {
      TestError::Step(msg) => Some(msg),
      _ => None,
    }
  }
}

// --- File set helpers ---
pub fn files(entries: &[(&str, &str)]) -> Files {
  entries
    .iter()
    .map(|(path, contents)| (path.to_string(), contents.to_string()))
    .collect()
}

pub fn shared(entries: &[(&str, &str)]) -> ContextData<Files> {
  ContextData::new(files(entries))
}

pub fn keys(set: &Files) -> Vec<&str> {
  set.keys().map(String::as_str).collect()
}

// --- Common Step Creators ---

/// Upper-cases every file it is given.
pub fn upper_case<Err>(step_name: &'static str) -> Transform<String, Meta, Err>
where
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  Transform::new(step_name, move |files: ContextData<Files>, meta: ContextData<Meta>| async move {
    for contents in files.write().values_mut() {
      *contents = contents.to_uppercase();
    }
    meta.write().log.push(step_name.to_string());
    Ok::<(), BranchError>(())
  })
}

/// Appends `suffix` to every file it is given.
pub fn append<Err>(step_name: &'static str, suffix: &'static str) -> Transform<String, Meta, Err>
where
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  Transform::new(step_name, move |files: ContextData<Files>, meta: ContextData<Meta>| async move {
    for contents in files.write().values_mut() {
      contents.push_str(suffix);
    }
    meta.write().log.push(step_name.to_string());
    Ok::<(), BranchError>(())
  })
}

/// Same as `append`, but completes only after a timer fires.
pub fn append_later<Err>(step_name: &'static str, suffix: &'static str, delay_ms: u64) -> Transform<String, Meta, Err>
where
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  Transform::new(step_name, move |files: ContextData<Files>, meta: ContextData<Meta>| async move {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    for contents in files.write().values_mut() {
      contents.push_str(suffix);
    }
    meta.write().log.push(step_name.to_string());
    Ok::<(), BranchError>(())
  })
}

/// Renames `x.md` to `x.html`, wrapping the contents in a paragraph.
pub fn render_markdown<Err>(step_name: &'static str) -> Transform<String, Meta, Err>
where
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  Transform::new(step_name, move |files: ContextData<Files>, meta: ContextData<Meta>| async move {
    {
      let mut guard = files.write();
      let sources: Vec<String> = guard.keys().filter(|k| k.ends_with(".md")).cloned().collect();
      for source in sources {
        if let Some(contents) = guard.shift_remove(&source) {
          let target = format!("{}.html", source.trim_end_matches(".md"));
          guard.insert(target, format!("<p>{}</p>", contents));
        }
      }
    }
    meta.write().log.push(step_name.to_string());
    Ok::<(), BranchError>(())
  })
}

/// Records what it sees (sorted paths) into `seen`, touches nothing.
pub fn observe<Err>(step_name: &'static str, seen: Arc<parking_lot::Mutex<Vec<String>>>) -> Transform<String, Meta, Err>
where
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  Transform::new(step_name, move |files: ContextData<Files>, _meta: ContextData<Meta>| {
    let seen = seen.clone();
    async move {
      let mut paths: Vec<String> = files.read().keys().cloned().collect();
      paths.sort();
      seen.lock().extend(paths);
      Ok::<(), BranchError>(())
    }
  })
}

pub fn failing(step_name: &'static str, error_message: &'static str) -> Transform<String, Meta, TestError> {
  Transform::new(step_name, move |files: ContextData<Files>, meta: ContextData<Meta>| async move {
    // Partial work that must never reach the enclosing set.
    for contents in files.write().values_mut() {
      contents.push_str(" PARTIAL");
    }
    meta.write().log.push(step_name.to_string());
    tracing::warn!(target: "test_steps", step = %step_name, "failing with: '{}'", error_message);
    Err::<(), TestError>(TestError::Step(error_message.to_string()))
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static STEP_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static PREDICATE_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  STEP_EXEC_COUNTER.store(0, Ordering::SeqCst);
  PREDICATE_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

/// Counts its executions in `STEP_EXEC_COUNTER`.
pub fn counting<Err>(step_name: &'static str) -> Transform<String, Meta, Err>
where
  Err: std::error::Error + From<BranchError> + Send + Sync + 'static,
{
  Transform::new(step_name, move |_files: ContextData<Files>, meta: ContextData<Meta>| async move {
    STEP_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    meta.write().log.push(step_name.to_string());
    Ok::<(), BranchError>(())
  })
}
