use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::utils::text::sanitize_id;

/// HTTP methods a path item may define, in documentation order.
const METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Metadata for a single API operation extracted from the contract.
#[derive(Debug, Clone)]
pub struct OperationEntry {
  /// The stable snake_case identifier used for the document file name.
  pub stable_id: String,
  /// The HTTP method, uppercased for display.
  pub method: String,
  /// The URL path pattern (e.g., `/pets/{petId}`).
  pub path: String,
  /// The operation object from the contract tree.
  pub node: Value,
}

impl OperationEntry {
  pub fn file_name(&self) -> String {
    format!("{}.md", self.stable_id)
  }
}

/// Filter for including or excluding operations from documentation.
///
/// Both sets can be combined; exclusion takes precedence when an id matches
/// both.
#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl OperationFilter {
  #[must_use]
  pub fn new(only: Option<&HashSet<String>>, excluded: Option<&HashSet<String>>) -> Self {
    Self {
      only: only.cloned(),
      excluded: excluded.cloned(),
    }
  }

  /// Returns whether the given base id passes this filter.
  #[must_use]
  pub fn accepts<S>(&self, base_id: S) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !included.contains(base_id.as_ref())
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && excluded.contains(base_id.as_ref())
    {
      return false;
    }

    true
  }
}

/// Registry of the operations to document, in contract declaration order.
///
/// Paths are walked in declaration order and methods in the fixed
/// documentation order, so the registry (and therefore every generated
/// artifact) is reproducible for a given contract.
#[derive(Debug, Default)]
pub struct OperationRegistry {
  entries: Vec<OperationEntry>,
}

impl OperationRegistry {
  #[must_use]
  pub fn from_document(document: &Value, filter: &OperationFilter) -> Self {
    let mut seen = IndexMap::<String, usize>::new();
    let mut entries = Vec::new();

    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
      return Self { entries };
    };

    for (path, path_item) in paths {
      let Some(path_fields) = path_item.as_object() else {
        continue;
      };

      for method in METHODS {
        let Some(operation) = path_fields.get(method) else {
          continue;
        };
        if !operation.is_object() {
          continue;
        }

        let base_id = operation
          .get("operationId")
          .and_then(Value::as_str)
          .map(sanitize_id)
          .unwrap_or_else(|| derive_operation_id(method, path));

        if !filter.accepts(&base_id) {
          continue;
        }

        let stable_id = unique_id(&base_id, &mut seen);
        entries.push(OperationEntry {
          stable_id,
          method: method.to_uppercase(),
          path: path.clone(),
          node: operation.clone(),
        });
      }
    }

    Self { entries }
  }

  pub fn entries(&self) -> &[OperationEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Derives a stable id from method and path when the contract declares no
/// `operationId`. Parameter segments collapse to `by_id`.
fn derive_operation_id(method: &str, path: &str) -> String {
  let segments: Vec<&str> = path
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      if segment.starts_with('{') && segment.ends_with('}') {
        "by_id"
      } else {
        segment
      }
    })
    .collect();

  let base = if segments.is_empty() {
    method.to_string()
  } else {
    format!("{method}_{}", segments.join("_"))
  };

  sanitize_id(&base)
}

/// Uniquifies a base id with `_2`, `_3`, … suffixes on collision.
fn unique_id(base_id: &str, seen: &mut IndexMap<String, usize>) -> String {
  let count = seen.entry(base_id.to_string()).or_insert(0);
  *count += 1;
  if *count == 1 {
    base_id.to_string()
  } else {
    format!("{base_id}_{count}")
  }
}
