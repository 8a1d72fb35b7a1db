use std::collections::BTreeSet;

use itertools::Itertools;
use serde_json::Value;

use super::{
  cache::ExpansionCache,
  reference::ModelRef,
  resolver::resolve_pointer,
  shape::{SchemaShape, classify},
};

/// Indentation unit: two spaces per nesting level.
const INDENT: &str = "  ";

/// Renders schema fragments into indented descriptive text.
///
/// Two cooperating mechanisms keep this terminating and cheap on arbitrary
/// reference graphs:
///
/// - the *branch guard*: the set of references currently being expanded along
///   the active recursion path. A reference met again on its own path renders
///   as a single `(recursive)` marker. The guard unwinds as the path unwinds
///   and is never shared across sibling branches or workers.
/// - the *expansion cache*: canonical renderings computed once at baseline
///   indentation and re-indented at every further call site. Shared for the
///   whole run.
///
/// Expanding the same reference at any two call sites yields identical
/// content modulo indentation.
pub struct SchemaExpander<'a> {
  root: &'a Value,
  cache: &'a ExpansionCache,
}

impl<'a> SchemaExpander<'a> {
  pub fn new(root: &'a Value, cache: &'a ExpansionCache) -> Self {
    Self { root, cache }
  }

  /// Expands a schema node into nested text.
  ///
  /// With `expand_refs_inline` set to false, a reference to a named model
  /// renders as a bare `$ref:` link, the mode used when the referenced model
  /// is documented separately. Other local references are always inlined.
  pub fn expand(&self, node: &Value, expand_refs_inline: bool) -> String {
    let mut guard = BTreeSet::new();
    let mut lines = Vec::new();
    self.expand_node(node, &mut guard, 0, expand_refs_inline, &mut lines);

    if lines.is_empty() {
      lines.push("(unknown)".to_string());
    }
    lines.join("\n")
  }

  fn expand_node(
    &self,
    node: &Value,
    guard: &mut BTreeSet<String>,
    level: usize,
    inline: bool,
    out: &mut Vec<String>,
  ) {
    match classify(node) {
      SchemaShape::Reference(reference) => self.expand_reference(reference, guard, level, inline, out),
      SchemaShape::Object(fields) => {
        push_line(out, level, "type: object");
        if let Some(description) = fields.get("description").and_then(Value::as_str) {
          push_description(out, level, description);
        }
        if let Some(properties) = fields.get("properties").and_then(Value::as_object) {
          for (name, property) in properties {
            self.expand_labeled(name, Some(property), guard, level + 1, inline, out);
          }
        }
      }
      SchemaShape::Array(fields) => {
        push_line(out, level, "type: array");
        self.expand_labeled("items", fields.get("items"), guard, level, inline, out);
      }
      SchemaShape::Primitive { type_name, fields } => {
        let mut line = format!("type: {type_name}");
        if let Some(format) = fields.get("format").and_then(Value::as_str) {
          line.push_str(&format!(" (format: {format})"));
        }
        if let Some(values) = fields.get("enum").and_then(Value::as_array) {
          let rendered = values.iter().map(scalar_text).join(", ");
          line.push_str(&format!(" enum: [{rendered}]"));
        }
        push_line(out, level, &line);
      }
      SchemaShape::Combinator { kind, branches } => {
        push_line(out, level, &format!("{}:", kind.keyword()));
        for (position, branch) in branches.iter().enumerate() {
          let label = format!("{}{position}", kind.branch_label());
          self.expand_labeled(&label, Some(branch), guard, level + 1, inline, out);
        }
      }
      SchemaShape::Unknown(node) => {
        if let Some(fields) = node.as_object() {
          if let Some(description) = fields.get("description").and_then(Value::as_str) {
            push_description(out, level, description);
          }
          if let Some(title) = fields.get("title").and_then(Value::as_str) {
            push_line(out, level, &format!("title: {title}"));
          }
        }
      }
    }
  }

  fn expand_reference(
    &self,
    reference: &str,
    guard: &mut BTreeSet<String>,
    level: usize,
    inline: bool,
    out: &mut Vec<String>,
  ) {
    let key = reference.to_ascii_lowercase();

    // Cycle along the active path: one marker line, guaranteed termination.
    if guard.contains(&key) {
      push_line(out, level, &format!("$ref: {reference} (recursive)"));
      return;
    }

    // Link mode: the named model gets its own section elsewhere.
    if !inline && ModelRef::parse(reference).is_some() {
      push_line(out, level, &format!("$ref: {reference}"));
      return;
    }

    if let Some(canonical) = self.cache.get(&key) {
      push_line(out, level, &format!("$ref: {reference}"));
      push_reindented(out, level + 1, &canonical);
      return;
    }

    guard.insert(key.clone());
    let canonical = match resolve_pointer(self.root, reference) {
      Ok(target) => {
        let mut lines = Vec::new();
        self.expand_node(target, guard, 0, inline, &mut lines);
        Some(lines.join("\n"))
      }
      // Unresolvable fragment degrades to the bare pointer; the rest of the
      // document is unaffected.
      Err(_) => None,
    };
    guard.remove(&key);

    push_line(out, level, &format!("$ref: {reference}"));
    if let Some(canonical) = canonical {
      self.cache.insert(key, canonical.clone());
      push_reindented(out, level + 1, &canonical);
    }
  }

  /// Emits a labeled entry: `<label>:` with the child expansion nested one
  /// level deeper, or `<label>: (unknown)` when the child renders to nothing.
  fn expand_labeled(
    &self,
    label: &str,
    child: Option<&Value>,
    guard: &mut BTreeSet<String>,
    level: usize,
    inline: bool,
    out: &mut Vec<String>,
  ) {
    let mut rendered = Vec::new();
    if let Some(child) = child {
      self.expand_node(child, guard, level + 1, inline, &mut rendered);
    }

    if rendered.is_empty() {
      push_line(out, level, &format!("{label}: (unknown)"));
    } else {
      push_line(out, level, &format!("{label}:"));
      out.append(&mut rendered);
    }
  }
}

fn push_line(out: &mut Vec<String>, level: usize, text: &str) {
  out.push(format!("{}{text}", INDENT.repeat(level)));
}

fn push_description(out: &mut Vec<String>, level: usize, description: &str) {
  for (index, piece) in description.lines().enumerate() {
    if index == 0 {
      push_line(out, level, &format!("description: {piece}"));
    } else {
      push_line(out, level, piece);
    }
  }
}

/// Re-indents a canonical (baseline-indented) rendering to a call site.
fn push_reindented(out: &mut Vec<String>, level: usize, canonical: &str) {
  let offset = INDENT.repeat(level);
  for line in canonical.lines() {
    out.push(format!("{offset}{line}"));
  }
}

fn scalar_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
