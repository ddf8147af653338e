// branchware/examples/error_handling.rs

use branchware::{Branch, BranchError, ContextData, FileSet, Pipeline};
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),

  #[error("Branch framework error during pipeline execution: {0}")]
  Branch(#[from] BranchError), // Allows BranchError to be converted into ExampleAppError
}

type Files = FileSet<String>;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: A step inside a nested branch returns a custom error
  info!("\nScenario 1: Step returns a custom error");
  run_branch_with_step_error().await;

  // Scenario 2: Misconfiguration surfaced by the pattern matcher
  info!("\nScenario 2: Invalid pattern");
  run_branch_with_invalid_pattern().await;
}

async fn run_branch_with_step_error() {
  let inner = Branch::<String, (), ExampleAppError>::builder()
    .glob("*.md")
    .transform("fails", |_files: ContextData<Files>, _meta: ContextData<()>| async move {
      Err::<(), _>(ExampleAppError::CustomError("Something went wrong in the inner branch!".to_string()))
    })
    .build();

  let mut host = Pipeline::<String, (), ExampleAppError>::new();
  host
    .transform("tag", |files: ContextData<Files>, _meta: ContextData<()>| async move {
      for contents in files.write().values_mut() {
        contents.push_str(" [tagged]");
      }
      Ok::<_, ExampleAppError>(())
    })
    .branch(Branch::builder().branch(inner).build());

  let files = ContextData::new(Files::from([("a.md".to_string(), "body".to_string())]));
  match host.run(files.clone(), ContextData::new(())).await {
    Ok(()) => error!("Pipeline unexpectedly succeeded"),
    Err(e) => {
      info!("Pipeline failed as expected: {}", e);
      match e {
        ExampleAppError::CustomError(msg) => assert!(msg.contains("inner branch")),
        other => error!("Unexpected error type: {:?}", other),
      }
    }
  }
  // The host step before the failure stays applied; there is no rollback.
  info!("Files after failure: {:?}", *files.read());
  assert_eq!(files.read()["a.md"], "body [tagged]");
}

async fn run_branch_with_invalid_pattern() {
  let branch = Branch::<String, (), ExampleAppError>::builder()
    .glob("docs/[a-z")
    .transform("never", |_files: ContextData<Files>, _meta: ContextData<()>| async move {
      Ok::<_, ExampleAppError>(())
    })
    .build();

  let files = ContextData::new(Files::from([("docs/a.md".to_string(), "body".to_string())]));
  match branch.invoke(files, ContextData::new(())).await {
    Err(ExampleAppError::Branch(BranchError::Pattern { pattern, source })) => {
      info!("Rejected pattern '{}': {}", pattern, source);
    }
    other => error!("Expected a pattern error, got {:?}", other),
  }
}
