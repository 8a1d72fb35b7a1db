use serde_json::Value;

use super::operation::join_blocks;
use crate::{
  generator::{operation_registry::OperationEntry, orchestrator::DocMetadata},
  utils::text::table_cell,
};

/// Renders the index document linking every generated operation document.
pub fn render_index(metadata: &DocMetadata, operations: &[OperationEntry]) -> String {
  let mut blocks = vec![format!("# {} v{}", metadata.title, metadata.version)];

  if let Some(description) = metadata.description.as_deref() {
    let trimmed = description.trim();
    if !trimmed.is_empty() {
      blocks.push(trimmed.to_string());
    }
  }

  if operations.is_empty() {
    blocks.push("_No operations defined._".to_string());
  } else {
    blocks.push("## Operations".to_string());
    let mut table = vec![
      "| Operation | Method | Path | Summary |".to_string(),
      "| --- | --- | --- | --- |".to_string(),
    ];
    for entry in operations {
      let summary = entry
        .node
        .get("summary")
        .and_then(Value::as_str)
        .map(table_cell)
        .filter(|cell| !cell.is_empty())
        .unwrap_or_else(|| "-".to_string());
      table.push(format!(
        "| [{}]({}) | {} | {} | {} |",
        entry.stable_id,
        entry.file_name(),
        entry.method,
        table_cell(&entry.path),
        summary
      ));
    }
    blocks.push(table.join("\n"));
  }

  join_blocks(blocks)
}
