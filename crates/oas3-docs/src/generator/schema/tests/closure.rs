use indexmap::IndexSet;
use serde_json::{Value, json};

use crate::generator::schema::{ModelRef, collect_model_refs, reference_closure};

fn seeds(references: &[&str]) -> IndexSet<ModelRef> {
  references
    .iter()
    .map(|reference| ModelRef::parse(reference).expect("seed should parse"))
    .collect()
}

fn names(closure: &IndexSet<ModelRef>) -> Vec<&str> {
  closure.iter().map(|model| model.name()).collect()
}

fn cyclic_document() -> Value {
  json!({
    "components": {
      "schemas": {
        "A": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/B" } } },
        "B": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/C" } } },
        "C": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/A" } } },
        "Lonely": { "type": "string" }
      }
    }
  })
}

#[test]
fn test_three_node_cycle_closure() {
  let root = cyclic_document();

  let closure = reference_closure(&root, &seeds(&["#/components/schemas/A"]));

  assert_eq!(names(&closure), vec!["A", "B", "C"]);
}

#[test]
fn test_closure_excludes_unreachable_models() {
  let root = cyclic_document();

  let closure = reference_closure(&root, &seeds(&["#/components/schemas/B"]));

  assert_eq!(closure.len(), 3);
  assert!(!closure.contains(&ModelRef::parse("#/components/schemas/Lonely").expect("should parse")));
}

#[test]
fn test_diamond_dependencies_appear_once() {
  let root = json!({
    "components": {
      "schemas": {
        "Order": {
          "type": "object",
          "properties": {
            "billing": { "$ref": "#/components/schemas/Address" },
            "shipping": { "$ref": "#/components/schemas/Address" },
            "customer": { "$ref": "#/components/schemas/Customer" }
          }
        },
        "Customer": {
          "type": "object",
          "properties": { "home": { "$ref": "#/components/schemas/Address" } }
        },
        "Address": { "type": "string" }
      }
    }
  });

  let closure = reference_closure(&root, &seeds(&["#/components/schemas/Order"]));

  assert_eq!(names(&closure), vec!["Order", "Address", "Customer"]);
}

#[test]
fn test_unresolvable_reference_is_skipped() {
  let root = json!({
    "components": {
      "schemas": {
        "Wrapper": {
          "type": "object",
          "properties": {
            "ghost": { "$ref": "#/components/schemas/Ghost" },
            "real": { "$ref": "#/components/schemas/Real" }
          }
        },
        "Real": { "type": "string" }
      }
    }
  });

  let closure = reference_closure(&root, &seeds(&["#/components/schemas/Wrapper"]));

  // The dangling reference stays in the set (the renderer degrades it) but
  // contributes no further traversal, and the rest is still discovered.
  assert_eq!(names(&closure), vec!["Wrapper", "Ghost", "Real"]);
}

#[test]
fn test_definitions_dialect_closure() {
  let root = json!({
    "definitions": {
      "Node": {
        "type": "object",
        "properties": {
          "child": { "$ref": "#/definitions/Node" },
          "label": { "$ref": "#/definitions/Label" }
        }
      },
      "Label": { "type": "string" }
    }
  });

  let closure = reference_closure(&root, &seeds(&["#/definitions/Node"]));

  assert_eq!(names(&closure), vec!["Node", "Label"]);
}

#[test]
fn test_empty_seeds_empty_closure() {
  let root = cyclic_document();
  let closure = reference_closure(&root, &IndexSet::new());
  assert!(closure.is_empty());
}

#[test]
fn test_seeds_from_body_scan() {
  let root = cyclic_document();
  let body = json!({
    "content": {
      "application/json": {
        "schema": { "type": "array", "items": { "$ref": "#/components/schemas/C" } }
      }
    }
  });

  let mut found = IndexSet::new();
  collect_model_refs(&body, &mut found);
  let closure = reference_closure(&root, &found);

  assert_eq!(names(&closure), vec!["C", "A", "B"]);
}
