// branchware/examples/nested_branches.rs

use branchware::{Branch, BranchError, ContextData, FileSet};
use tracing::info;

type Files = FileSet<String>;

#[tokio::main]
async fn main() -> Result<(), BranchError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Nested Branches Example ---");

  // Inner branch: post-process only the pages under posts/
  let posts: Branch<String, (), BranchError> = Branch::builder()
    .name("posts")
    .glob("posts/**")
    .transform("footer", |files: ContextData<Files>, _meta: ContextData<()>| async move {
      for contents in files.write().values_mut() {
        contents.push_str("<footer>post</footer>");
      }
      Ok::<_, BranchError>(())
    })
    .build();

  // Outer branch: render markdown, then hand the generated html to the inner branch
  let site = Branch::builder()
    .name("pages")
    .glob(["**/*.md", "**/*.html", "!drafts/**"])
    .transform("markdown", |files: ContextData<Files>, _meta: ContextData<()>| async move {
      let mut guard = files.write();
      let sources: Vec<String> = guard.keys().filter(|k| k.ends_with(".md")).cloned().collect();
      for source in sources {
        if let Some(body) = guard.shift_remove(&source) {
          guard.insert(source.replace(".md", ".html"), format!("<p>{}</p>", body));
        }
      }
      Ok::<_, BranchError>(())
    })
    .branch(posts)
    .build();

  let files = ContextData::new(Files::from([
    ("index.md".to_string(), "home".to_string()),
    ("posts/first.md".to_string(), "first post".to_string()),
    ("drafts/wip.md".to_string(), "not yet".to_string()),
    ("logo.svg".to_string(), "<svg/>".to_string()),
  ]));

  site.invoke(files.clone(), ContextData::new(())).await?;

  for (path, contents) in files.read().iter() {
    info!("{} => {}", path, contents);
  }
  assert_eq!(files.read()["posts/first.html"], "<p>first post</p><footer>post</footer>");
  assert_eq!(files.read()["drafts/wip.md"], "not yet");
  Ok(())
}
