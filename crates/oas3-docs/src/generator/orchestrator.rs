//! Orchestration for the contract-to-Markdown documentation pipeline.
//!
//! The orchestrator owns the parsed contract tree and drives the whole run:
//! catalog and registry construction, one rendering worker per operation
//! sharing a single expansion cache, index assembly, and statistics
//! collection. Callers get back rendered documents and stats; all file I/O
//! stays with the CLI layer.

use std::{collections::HashSet, sync::Arc};

use bon::Builder;
use serde_json::Value;
use tokio::task::JoinSet;

pub use crate::generator::metrics::GenerationStats;
use crate::generator::{
  catalog::SchemaCatalog,
  document::{index::render_index, models::render_model_catalog, operation::render_operation},
  operation_registry::{OperationFilter, OperationRegistry},
  schema::ExpansionCache,
};

/// Run-level configuration for a documentation pass.
#[derive(Debug, Clone, Default, Builder)]
pub struct DocgenConfig {
  /// Also emit a catalog document covering every named schema, including
  /// ones no operation reaches.
  #[builder(default)]
  pub all_schemas: bool,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
}

/// Contract metadata used for the index header.
#[derive(Debug, Clone)]
pub struct DocMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// One generated Markdown file, named but not yet written to disk.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
  pub file_name: String,
  pub markdown: String,
}

/// Everything one generation run produces.
#[derive(Debug)]
pub struct GeneratedOutput {
  pub documents: Vec<RenderedDocument>,
  pub index: String,
  pub model_catalog: Option<String>,
  pub stats: GenerationStats,
}

pub struct Orchestrator {
  document: Arc<Value>,
  config: DocgenConfig,
}

impl Orchestrator {
  pub fn new(document: Value, config: DocgenConfig) -> Self {
    Self {
      document: Arc::new(document),
      config,
    }
  }

  /// Extracts the contract's `info` metadata, with stable fallbacks.
  pub fn metadata(&self) -> DocMetadata {
    let field = |name: &str| {
      self
        .document
        .get("info")
        .and_then(|info| info.get(name))
        .and_then(Value::as_str)
    };

    DocMetadata {
      title: field("title").unwrap_or("Untitled API").to_string(),
      version: field("version").unwrap_or("0.0.0").to_string(),
      description: field("description").map(ToString::to_string),
    }
  }

  /// Runs the full documentation pipeline.
  ///
  /// Operations render on independent workers sharing one expansion cache;
  /// results are re-ordered to registration order before the index is
  /// assembled, so output never depends on scheduling.
  pub async fn generate(&self) -> anyhow::Result<GeneratedOutput> {
    let mut stats = GenerationStats::default();

    let mut catalog = SchemaCatalog::from_document(&self.document);
    stats.record_catalog_size(catalog.len());
    stats.record_cycles(catalog.detect_cycles());

    let filter = OperationFilter::new(
      self.config.only_operations.as_ref(),
      self.config.excluded_operations.as_ref(),
    );
    let registry = OperationRegistry::from_document(&self.document, &filter);

    let cache = Arc::new(ExpansionCache::new());

    let mut workers = JoinSet::new();
    for (position, entry) in registry.entries().iter().enumerate() {
      let document = Arc::clone(&self.document);
      let cache = Arc::clone(&cache);
      let entry = entry.clone();
      workers.spawn(async move {
        let file_name = entry.file_name();
        let rendered = render_operation(&document, &cache, &entry);
        (position, file_name, rendered)
      });
    }

    let mut rendered = Vec::with_capacity(registry.len());
    while let Some(joined) = workers.join_next().await {
      rendered.push(joined?);
    }
    rendered.sort_by_key(|(position, _, _)| *position);

    let mut documents = Vec::with_capacity(rendered.len());
    let mut reachable: HashSet<String> = HashSet::new();
    for (_, file_name, outcome) in rendered {
      stats.record_operation();
      stats.record_models(outcome.models_documented);
      stats.record_warnings(outcome.warnings);
      reachable.extend(outcome.model_keys);
      documents.push(RenderedDocument {
        file_name,
        markdown: outcome.markdown,
      });
    }

    let orphaned = catalog
      .entries()
      .filter(|entry| !reachable.contains(entry.model.key()))
      .count();
    stats.record_orphaned_schemas(orphaned);

    let model_catalog = if self.config.all_schemas {
      stats.record_models(catalog.len());
      Some(render_model_catalog(&self.document, &cache, &catalog))
    } else {
      None
    };

    stats.record_cached_expansions(cache.len());

    let index = render_index(&self.metadata(), registry.entries());

    Ok(GeneratedOutput {
      documents,
      index,
      model_catalog,
      stats,
    })
  }
}
