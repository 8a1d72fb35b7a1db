use serde_json::Value;

use super::operation::join_blocks;
use crate::{
  generator::{catalog::SchemaCatalog, schema::{ExpansionCache, SchemaExpander}},
  utils::text::fenced,
};

/// Renders the standalone model catalog document (`--all-schemas`).
///
/// Every named definition is documented exactly once, in declaration order,
/// with nested model references kept as links.
pub fn render_model_catalog(root: &Value, cache: &ExpansionCache, catalog: &SchemaCatalog) -> String {
  let expander = SchemaExpander::new(root, cache);
  let mut blocks = vec!["# Models".to_string()];

  if catalog.is_empty() {
    blocks.push("_No named schemas defined._".to_string());
  }

  for entry in catalog.entries() {
    blocks.push(format!("## {}", entry.name));
    if catalog.is_cyclic(&entry.name) {
      blocks.push("_Part of a reference cycle._".to_string());
    }
    blocks.push(fenced(&expander.expand(&entry.node, false)));
  }

  join_blocks(blocks)
}
