// branchware/examples/basic_branch.rs

use branchware::{Branch, BranchError, ContextData, FileSet, Pipeline};
use tracing::info;

// 1. Site-wide metadata shared with every step
#[derive(Clone, Debug, Default)]
struct SiteMeta {
  site_name: String,
  rendered: usize,
}

#[tokio::main]
async fn main() -> Result<(), BranchError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Branch Example ---");

  // 2. Build a branch that only sees markdown files
  let markdown = Branch::builder()
    .glob("*.md")
    .transform("shout", |files: ContextData<FileSet<String>>, _meta: ContextData<SiteMeta>| async move {
      for contents in files.write().values_mut() {
        *contents = contents.to_uppercase();
      }
      Ok::<_, BranchError>(())
    })
    .transform("render", |files: ContextData<FileSet<String>>, meta: ContextData<SiteMeta>| async move {
      let site_name = meta.read().site_name.clone();
      let rendered = {
        let mut guard = files.write();
        let sources: Vec<String> = guard.keys().cloned().collect();
        for source in &sources {
          if let Some(body) = guard.shift_remove(source) {
            let target = source.replace(".md", ".html");
            guard.insert(target, format!("<title>{}</title><p>{}</p>", site_name, body));
          }
        }
        sources.len()
      };
      meta.write().rendered += rendered;
      Ok::<_, BranchError>(())
    })
    .build();

  // 3. Host pipeline: a leaf step, then the branch
  let mut host = Pipeline::<String, SiteMeta>::new();
  host
    .transform("stamp", |files: ContextData<FileSet<String>>, _meta: ContextData<SiteMeta>| async move {
      files.write().insert("robots.txt".to_string(), "User-agent: *".to_string());
      Ok::<_, BranchError>(())
    })
    .branch(markdown);

  let files = ContextData::new(FileSet::from([
    ("index.md".to_string(), "# hi".to_string()),
    ("style.css".to_string(), "body {}".to_string()),
  ]));
  let meta = ContextData::new(SiteMeta {
    site_name: "Example".to_string(),
    ..Default::default()
  });

  // 4. Run and inspect
  host.run(files.clone(), meta.clone()).await?;

  for (path, contents) in files.read().iter() {
    info!("{} => {}", path, contents);
  }
  info!("Rendered {} markdown file(s).", meta.read().rendered);
  assert!(files.read().contains_key("index.html"));
  assert!(!files.read().contains_key("index.md"));
  Ok(())
}
