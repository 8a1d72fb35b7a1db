use indexmap::IndexSet;
use serde_json::Value;

use crate::{
  generator::{
    metrics::GenerationWarning,
    operation_registry::OperationEntry,
    schema::{ExpansionCache, ModelRef, SchemaExpander, collect_model_refs, reference_closure, resolve_pointer},
  },
  utils::text::{fenced, table_cell},
};

/// Result of rendering one operation document.
#[derive(Debug)]
pub struct RenderedOperation {
  pub markdown: String,
  /// Identity keys of every model in the operation's reference closure.
  pub model_keys: Vec<String>,
  pub models_documented: usize,
  pub warnings: Vec<GenerationWarning>,
}

/// Renders the Markdown document for a single API operation.
///
/// Schema renderings are embedded as fenced blocks with reference link mode
/// on, so every named model the operation depends on appears exactly once in
/// the trailing Models section. A reference that cannot be resolved degrades
/// that fragment and records a warning; it never aborts the document.
pub fn render_operation(root: &Value, cache: &ExpansionCache, entry: &OperationEntry) -> RenderedOperation {
  let expander = SchemaExpander::new(root, cache);
  let mut warnings = Vec::new();
  let mut blocks: Vec<String> = Vec::new();
  // Resolved body/response subtrees; the closure is seeded from these.
  let mut seed_scope: Vec<&Value> = Vec::new();

  blocks.push(format!("# {} {}", entry.method, entry.path));

  if let Some(summary) = text_field(&entry.node, "summary") {
    blocks.push(summary);
  }
  if let Some(description) = text_field(&entry.node, "description") {
    blocks.push(description);
  }

  blocks.push(format!("**Operation ID:** `{}`", entry.stable_id));

  if entry.node.get("deprecated").and_then(Value::as_bool) == Some(true) {
    blocks.push("> **Deprecated.**".to_string());
  }

  render_parameters(root, entry, &mut blocks, &mut warnings);
  render_request_body(root, entry, &expander, &mut blocks, &mut warnings, &mut seed_scope);
  render_responses(root, entry, &expander, &mut blocks, &mut warnings, &mut seed_scope);

  let mut seeds = IndexSet::new();
  for node in &seed_scope {
    collect_model_refs(node, &mut seeds);
  }
  let closure = reference_closure(root, &seeds);

  let mut model_keys = Vec::with_capacity(closure.len());
  let mut models_documented = 0;
  if !closure.is_empty() {
    blocks.push("## Models".to_string());
    for model in &closure {
      model_keys.push(model.key().to_string());
      blocks.push(format!("### {}", model.name()));
      match resolve_pointer(root, model.raw()) {
        Ok(target) => {
          blocks.push(fenced(&expander.expand(target, false)));
          models_documented += 1;
        }
        Err(_) => {
          warnings.push(GenerationWarning::UnresolvedModel {
            operation_id: entry.stable_id.clone(),
            reference: model.raw().to_string(),
          });
          blocks.push(format!("_Unresolvable reference `{}`._", model.raw()));
        }
      }
    }
  }

  RenderedOperation {
    markdown: join_blocks(blocks),
    model_keys,
    models_documented,
    warnings,
  }
}

fn render_parameters(root: &Value, entry: &OperationEntry, blocks: &mut Vec<String>, warnings: &mut Vec<GenerationWarning>) {
  let Some(parameters) = entry.node.get("parameters").and_then(Value::as_array) else {
    return;
  };
  if parameters.is_empty() {
    return;
  }

  blocks.push("## Parameters".to_string());
  let mut table = vec![
    "| Name | In | Required | Type | Description |".to_string(),
    "| --- | --- | --- | --- | --- |".to_string(),
  ];

  for parameter in parameters {
    match deref(root, parameter) {
      Ok(parameter) => {
        let name = parameter.get("name").and_then(Value::as_str).unwrap_or("-");
        let location = parameter.get("in").and_then(Value::as_str).unwrap_or("-");
        let required = if parameter.get("required").and_then(Value::as_bool) == Some(true) {
          "yes"
        } else {
          "no"
        };
        let description = parameter
          .get("description")
          .and_then(Value::as_str)
          .map(table_cell)
          .filter(|cell| !cell.is_empty())
          .unwrap_or_else(|| "-".to_string());
        table.push(format!(
          "| {} | {} | {} | {} | {} |",
          table_cell(name),
          location,
          required,
          parameter_type(parameter),
          description
        ));
      }
      Err(reference) => {
        warnings.push(GenerationWarning::UnresolvedParameter {
          operation_id: entry.stable_id.clone(),
          reference: reference.clone(),
        });
        table.push(format!("| `{}` | - | - | - | unresolvable reference |", table_cell(&reference)));
      }
    }
  }

  blocks.push(table.join("\n"));
}

fn render_request_body<'a>(
  root: &'a Value,
  entry: &'a OperationEntry,
  expander: &SchemaExpander<'_>,
  blocks: &mut Vec<String>,
  warnings: &mut Vec<GenerationWarning>,
  seed_scope: &mut Vec<&'a Value>,
) {
  let Some(request_body) = entry.node.get("requestBody") else {
    return;
  };

  blocks.push("## Request Body".to_string());
  match deref(root, request_body) {
    Ok(body) => {
      seed_scope.push(body);
      if let Some(description) = text_field(body, "description") {
        blocks.push(description);
      }
      render_content(body, expander, blocks);
    }
    Err(reference) => {
      warnings.push(GenerationWarning::UnresolvedFragment {
        operation_id: entry.stable_id.clone(),
        reference: reference.clone(),
      });
      blocks.push(format!("_Unresolvable reference `{reference}`._"));
    }
  }
}

fn render_responses<'a>(
  root: &'a Value,
  entry: &'a OperationEntry,
  expander: &SchemaExpander<'_>,
  blocks: &mut Vec<String>,
  warnings: &mut Vec<GenerationWarning>,
  seed_scope: &mut Vec<&'a Value>,
) {
  let Some(responses) = entry.node.get("responses").and_then(Value::as_object) else {
    return;
  };
  if responses.is_empty() {
    return;
  }

  blocks.push("## Responses".to_string());
  for (status, response) in responses {
    blocks.push(format!("### {status}"));
    match deref(root, response) {
      Ok(response) => {
        seed_scope.push(response);
        if let Some(description) = text_field(response, "description") {
          blocks.push(description);
        }
        render_content(response, expander, blocks);
      }
      Err(reference) => {
        warnings.push(GenerationWarning::UnresolvedFragment {
          operation_id: entry.stable_id.clone(),
          reference: reference.clone(),
        });
        blocks.push(format!("_Unresolvable reference `{reference}`._"));
      }
    }
  }
}

/// Emits one fenced schema block per media type, in declaration order.
fn render_content(node: &Value, expander: &SchemaExpander<'_>, blocks: &mut Vec<String>) {
  let Some(content) = node.get("content").and_then(Value::as_object) else {
    return;
  };

  for (media_type, media) in content {
    blocks.push(format!("**Content** `{media_type}`:"));
    if let Some(schema) = media.get("schema") {
      blocks.push(fenced(&expander.expand(schema, false)));
    }
  }
}

/// Follows a single `$ref` indirection, returning the raw pointer on failure.
fn deref<'a>(root: &'a Value, node: &'a Value) -> Result<&'a Value, String> {
  match node.get("$ref").and_then(Value::as_str) {
    Some(reference) => resolve_pointer(root, reference).map_err(|_| reference.to_string()),
    None => Ok(node),
  }
}

fn parameter_type(parameter: &Value) -> String {
  let Some(schema) = parameter.get("schema") else {
    return "-".to_string();
  };

  if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
    return match ModelRef::parse(reference) {
      Some(model) => model.name().to_string(),
      None => reference.to_string(),
    };
  }

  schema
    .get("type")
    .and_then(Value::as_str)
    .unwrap_or("-")
    .to_string()
}

fn text_field(node: &Value, field: &str) -> Option<String> {
  node
    .get(field)
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|text| !text.is_empty())
    .map(ToString::to_string)
}

pub(super) fn join_blocks(blocks: Vec<String>) -> String {
  let mut markdown = blocks.join("\n\n");
  markdown.push('\n');
  markdown
}
