use std::collections::HashSet;

use serde_json::Value;

use crate::generator::orchestrator::{DocgenConfig, Orchestrator};

pub(super) fn parse_spec(spec_json: &str) -> Value {
  serde_json::from_str(spec_json).expect("failed to parse test spec")
}

pub(super) fn string_set(values: &[&str]) -> HashSet<String> {
  values.iter().map(|value| (*value).to_string()).collect::<HashSet<_>>()
}

pub(super) fn make_orchestrator(document: Value, all_schemas: bool) -> Orchestrator {
  Orchestrator::new(document, DocgenConfig::builder().all_schemas(all_schemas).build())
}

pub(super) fn assert_contains(markdown: &str, expected: &str, context: &str) {
  assert!(
    markdown.contains(expected),
    "missing {context}: expected '{expected}'"
  );
}

pub(super) fn assert_not_contains(markdown: &str, pattern: &str, context: &str) {
  assert!(!markdown.contains(pattern), "{context}: '{pattern}' should not appear");
}

pub(super) fn assert_occurs_exactly(markdown: &str, pattern: &str, expected: usize, context: &str) {
  let actual = markdown.matches(pattern).count();
  assert_eq!(
    actual, expected,
    "{context}: expected {expected} occurrences of '{pattern}', found {actual}"
  );
}

/// A contract exercising bodies, responses, shared models, and a cycle.
pub(super) const PETSTORE_SPEC: &str = r##"{
  "openapi": "3.0.0",
  "info": {
    "title": "Petstore",
    "version": "1.0.0",
    "description": "A sample pet store API"
  },
  "paths": {
    "/pets": {
      "get": {
        "operationId": "listPets",
        "summary": "List all pets",
        "parameters": [
          {
            "name": "limit",
            "in": "query",
            "required": false,
            "description": "Maximum number of pets to return",
            "schema": { "type": "integer", "format": "int32" }
          }
        ],
        "responses": {
          "200": {
            "description": "A paged array of pets",
            "content": {
              "application/json": {
                "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
              }
            }
          }
        }
      },
      "post": {
        "operationId": "createPet",
        "summary": "Create a pet",
        "requestBody": {
          "content": {
            "application/json": {
              "schema": { "$ref": "#/components/schemas/Pet" }
            }
          }
        },
        "responses": {
          "201": { "description": "Created" }
        }
      }
    },
    "/pets/{petId}": {
      "get": {
        "summary": "Info for a specific pet",
        "parameters": [
          {
            "name": "petId",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
          }
        ],
        "responses": {
          "200": {
            "description": "The requested pet",
            "content": {
              "application/json": {
                "schema": { "$ref": "#/components/schemas/Pet" }
              }
            }
          },
          "default": {
            "description": "Unexpected error",
            "content": {
              "application/json": {
                "schema": { "$ref": "#/components/schemas/Error" }
              }
            }
          }
        }
      }
    }
  },
  "components": {
    "schemas": {
      "Pet": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "format": "int64" },
          "name": { "type": "string" },
          "tag": { "$ref": "#/components/schemas/Tag" },
          "friend": { "$ref": "#/components/schemas/Pet" }
        }
      },
      "Tag": {
        "type": "object",
        "properties": { "label": { "type": "string" } }
      },
      "Error": {
        "type": "object",
        "properties": {
          "code": { "type": "integer" },
          "message": { "type": "string" }
        }
      },
      "Unused": {
        "type": "object",
        "properties": { "note": { "type": "string" } }
      }
    }
  }
}"##;
