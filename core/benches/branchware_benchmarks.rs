use branchware::{Branch, BranchError, ContextData, FileSet, Pipeline, Transform};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

type BenchFiles = FileSet<String>;

#[derive(Clone, Debug, Default)]
struct BenchMeta {
  touched: u64,
}

fn make_files(num_files: usize) -> BenchFiles {
  (0..num_files)
    .map(|i| {
      let ext = if i % 2 == 0 { "md" } else { "txt" };
      (format!("dir_{}/file_{}.{}", i % 7, i, ext), format!("contents of {}", i))
    })
    .collect()
}

// --- Helper: Synchronous rewrite of every selected file ---
fn create_append_step(name: &'static str) -> Transform<String, BenchMeta, BranchError> {
  Transform::new(name, |files: ContextData<BenchFiles>, meta: ContextData<BenchMeta>| async move {
    let mut touched = 0;
    for contents in files.write().values_mut() {
      contents.push('.');
      touched += 1;
    }
    meta.write().touched += touched;
    Ok::<(), BranchError>(())
  })
}

// --- Helper: Step that yields before completing ---
fn create_async_step(delay_micros: u64) -> Transform<String, BenchMeta, BranchError> {
  Transform::new("async", move |files: ContextData<BenchFiles>, _meta: ContextData<BenchMeta>| async move {
    if delay_micros > 0 {
      tokio::time::sleep(std::time::Duration::from_micros(delay_micros)).await;
    }
    if let Some((_, contents)) = files.write().first_mut() {
      contents.push('!');
    }
    Ok::<(), BranchError>(())
  })
}

fn bench_flat_branch(c: &mut Criterion) {
  let mut group = c.benchmark_group("FlatBranch");
  let rt = Runtime::new().unwrap();

  for num_files in [10, 100, 1000].iter() {
    for num_steps in [1, 5].iter() {
      let mut builder = Branch::builder().glob("**/*.md");
      for _ in 0..*num_steps {
        builder = builder.use_step(create_append_step("append"));
      }
      let branch = Arc::new(builder.build());

      group.throughput(Throughput::Elements(*num_files as u64 * *num_steps as u64));
      group.bench_with_input(
        BenchmarkId::new(format!("{}steps", num_steps), num_files),
        num_files,
        |b, &num_files| {
          b.to_async(&rt).iter_batched(
            || (ContextData::new(make_files(num_files)), ContextData::new(BenchMeta::default())),
            |(files, meta)| {
              let branch = branch.clone();
              async move { branch.invoke(files, meta).await.unwrap() }
            },
            criterion::BatchSize::SmallInput,
          );
        },
      );
    }
  }
  group.finish();
}

fn bench_nested_branches(c: &mut Criterion) {
  let mut group = c.benchmark_group("NestedBranches");
  let rt = Runtime::new().unwrap();

  for depth in [1, 3, 6].iter() {
    let mut branch = Branch::builder()
      .glob("**/*.md")
      .use_step(create_append_step("leaf"))
      .build();
    for _ in 1..*depth {
      branch = Branch::builder()
        .filter(|path: &str, _record: &String, _index: usize| path.starts_with("dir_"))
        .use_step(create_append_step("level"))
        .branch(branch)
        .build();
    }
    let mut host = Pipeline::new();
    host.branch(branch);
    let host = Arc::new(host);

    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::from_parameter(*depth), depth, |b, _| {
      b.to_async(&rt).iter_batched(
        || (ContextData::new(make_files(200)), ContextData::new(BenchMeta::default())),
        |(files, meta)| {
          let host = host.clone();
          async move { host.run(files, meta).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_async_steps(c: &mut Criterion) {
  let mut group = c.benchmark_group("BranchAsyncSteps");
  let rt = Runtime::new().unwrap();

  for delay_us in [0, 10, 100].iter() {
    let branch = Arc::new(
      Branch::builder()
        .glob("**/*.md")
        .use_step(create_async_step(*delay_us))
        .use_step(create_async_step(*delay_us))
        .build(),
    );

    group.bench_with_input(BenchmarkId::from_parameter(*delay_us), delay_us, |b, _| {
      b.to_async(&rt).iter_batched(
        || (ContextData::new(make_files(50)), ContextData::new(BenchMeta::default())),
        |(files, meta)| {
          let branch = branch.clone();
          async move { branch.invoke(files, meta).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_context_data_access(c: &mut Criterion) {
  let mut group = c.benchmark_group("ContextDataAccess");
  let files = ContextData::new(make_files(100));

  group.bench_function("read_lock", |b| {
    b.iter(|| {
      let guard = files.read();
      criterion::black_box(guard.len());
    })
  });

  group.bench_function("write_lock_and_modify", |b| {
    b.iter(|| {
      let mut guard = files.write();
      if let Some(contents) = guard.get_mut("dir_0/file_0.md") {
        contents.push('x');
        contents.pop();
      }
      criterion::black_box(guard.len());
    })
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_flat_branch,
  bench_nested_branches,
  bench_async_steps,
  bench_context_data_access
);
criterion_main!(benches);
