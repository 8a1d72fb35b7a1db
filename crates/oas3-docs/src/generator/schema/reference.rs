use std::{
  cmp::Ordering,
  hash::{Hash, Hasher},
};

use indexmap::IndexSet;
use serde_json::Value;

/// OpenAPI v3 dialect for named schema definitions.
const COMPONENT_SCHEMAS_PREFIX: &str = "#/components/schemas/";
/// Swagger/JSON Schema dialect for named schema definitions.
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A reference to a named schema definition within the same document.
///
/// Recognized in two equivalent dialects (`#/components/schemas/<Name>` and
/// `#/definitions/<Name>`). Identity is the full pointer string compared
/// case-insensitively; the original spelling is kept for display.
#[derive(Debug, Clone)]
pub struct ModelRef {
  raw: String,
  key: String,
}

impl ModelRef {
  /// Parses a `$ref` string into a model reference.
  ///
  /// Returns `None` for pointers that do not name a top-level schema
  /// definition (inline pointers, parameters, external references).
  pub fn parse(raw: &str) -> Option<Self> {
    let key = raw.to_ascii_lowercase();
    let prefix_len = if key.starts_with(COMPONENT_SCHEMAS_PREFIX) {
      COMPONENT_SCHEMAS_PREFIX.len()
    } else if key.starts_with(DEFINITIONS_PREFIX) {
      DEFINITIONS_PREFIX.len()
    } else {
      return None;
    };

    if raw.len() == prefix_len {
      return None;
    }

    Some(Self {
      raw: raw.to_string(),
      key,
    })
  }

  /// The reference exactly as spelled in the document.
  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// The case-folded identity used for guard, cache, and set membership.
  pub fn key(&self) -> &str {
    &self.key
  }

  /// The display name: the trailing path segment of the original spelling.
  pub fn name(&self) -> &str {
    self.raw.rsplit('/').next().unwrap_or(&self.raw)
  }
}

impl PartialEq for ModelRef {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key
  }
}

impl Eq for ModelRef {}

impl Hash for ModelRef {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.key.hash(state);
  }
}

impl PartialOrd for ModelRef {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for ModelRef {
  fn cmp(&self, other: &Self) -> Ordering {
    self.key.cmp(&other.key)
  }
}

/// Collects every model reference in a subtree, anywhere in the tree.
///
/// First discovery wins: the returned set keeps insertion order, and a
/// reference spelled in several casings keeps its first spelling.
pub fn collect_model_refs(node: &Value, found: &mut IndexSet<ModelRef>) {
  match node {
    Value::Object(fields) => {
      if let Some(reference) = fields.get("$ref").and_then(Value::as_str)
        && let Some(model) = ModelRef::parse(reference)
      {
        found.insert(model);
      }
      for value in fields.values() {
        collect_model_refs(value, found);
      }
    }
    Value::Array(items) => {
      for item in items {
        collect_model_refs(item, found);
      }
    }
    _ => {}
  }
}
