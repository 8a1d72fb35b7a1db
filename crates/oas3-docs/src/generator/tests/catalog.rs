use serde_json::json;

use super::support::{PETSTORE_SPEC, parse_spec};
use crate::generator::catalog::SchemaCatalog;

#[test]
fn test_catalog_collects_components_schemas() {
  let document = parse_spec(PETSTORE_SPEC);
  let catalog = SchemaCatalog::from_document(&document);

  assert_eq!(catalog.len(), 4);
  let names: Vec<&str> = catalog.entries().map(|entry| entry.name.as_str()).collect();
  assert_eq!(names, vec!["Pet", "Tag", "Error", "Unused"]);
}

#[test]
fn test_catalog_collects_both_dialects() {
  let document = json!({
    "components": { "schemas": { "Pet": { "type": "object" } } },
    "definitions": { "LegacyPet": { "type": "object" } }
  });
  let catalog = SchemaCatalog::from_document(&document);

  assert_eq!(catalog.len(), 2);
  assert!(catalog.contains_key("#/components/schemas/pet"));
  assert!(catalog.contains_key("#/definitions/legacypet"));
}

#[test]
fn test_catalog_empty_document() {
  let catalog = SchemaCatalog::from_document(&json!({ "paths": {} }));
  assert!(catalog.is_empty());
}

#[test]
fn test_detect_self_cycle() {
  let document = parse_spec(PETSTORE_SPEC);
  let mut catalog = SchemaCatalog::from_document(&document);

  let cycles = catalog.detect_cycles();

  assert_eq!(cycles.len(), 1);
  assert_eq!(cycles[0], vec!["Pet".to_string()]);
  assert!(catalog.is_cyclic("Pet"));
  assert!(!catalog.is_cyclic("Tag"));
}

#[test]
fn test_detect_two_node_cycle() {
  let document = json!({
    "components": {
      "schemas": {
        "Parent": {
          "type": "object",
          "properties": { "child": { "$ref": "#/components/schemas/Child" } }
        },
        "Child": {
          "type": "object",
          "properties": { "parent": { "$ref": "#/components/schemas/Parent" } }
        },
        "Standalone": { "type": "string" }
      }
    }
  });
  let mut catalog = SchemaCatalog::from_document(&document);

  let cycles = catalog.detect_cycles();

  assert_eq!(cycles.len(), 1);
  let mut members = cycles[0].clone();
  members.sort();
  assert_eq!(members, vec!["Child".to_string(), "Parent".to_string()]);
  assert!(!catalog.is_cyclic("Standalone"));
}

#[test]
fn test_dangling_reference_is_not_an_edge() {
  let document = json!({
    "components": {
      "schemas": {
        "Wrapper": {
          "type": "object",
          "properties": { "ghost": { "$ref": "#/components/schemas/Ghost" } }
        }
      }
    }
  });
  let mut catalog = SchemaCatalog::from_document(&document);

  assert_eq!(catalog.len(), 1);
  assert!(catalog.detect_cycles().is_empty());
}
