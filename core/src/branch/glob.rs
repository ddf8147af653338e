// branchware/src/branch/glob.rs

//! Glob matching for pattern selectors, backed by `globset` (feature `glob`).

use crate::branch::selector::{Pattern, PatternMatcher};
use anyhow::Context;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Matches paths against a list of globs.
///
/// `*` stays within one path segment and `**` crosses segments. Entries starting
/// with `!` exclude: a path is selected when it matches at least one include glob
/// and no exclude glob. A list with only exclusions selects nothing.
///
/// Each distinct pattern list is compiled once and cached.
#[derive(Debug, Default)]
pub struct GlobMatcher {
  compiled: RwLock<HashMap<Pattern, Arc<CompiledGlobs>>>,
}

#[derive(Debug)]
struct CompiledGlobs {
  include: GlobSet,
  exclude: GlobSet,
}

impl CompiledGlobs {
  fn compile(pattern: &Pattern) -> anyhow::Result<Self> {
    let mut include = GlobSetBuilder::new();
    let mut exclude = GlobSetBuilder::new();
    for raw in pattern.iter() {
      let (target, glob) = match raw.strip_prefix('!') {
        Some(negated) => (&mut exclude, negated),
        None => (&mut include, raw),
      };
      if glob.is_empty() {
        anyhow::bail!("empty glob in '{}'", pattern);
      }
      let glob = GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob '{}'", raw))?;
      target.add(glob);
    }
    Ok(Self {
      include: include.build()?,
      exclude: exclude.build()?,
    })
  }

  fn is_match(&self, path: &str) -> bool {
    self.include.is_match(path) && !self.exclude.is_match(path)
  }
}

impl GlobMatcher {
  pub fn new() -> Self {
    Self::default()
  }

  fn compiled(&self, pattern: &Pattern) -> anyhow::Result<Arc<CompiledGlobs>> {
    if let Some(compiled) = self.compiled.read().get(pattern) {
      return Ok(Arc::clone(compiled));
    }
    let compiled = Arc::new(CompiledGlobs::compile(pattern)?);
    self.compiled.write().insert(pattern.clone(), Arc::clone(&compiled));
    Ok(compiled)
  }
}

impl PatternMatcher for GlobMatcher {
  fn is_match(&self, path: &str, pattern: &Pattern) -> anyhow::Result<bool> {
    Ok(self.compiled(pattern)?.is_match(path))
  }
}
