use serde_json::json;

use super::first_operation;
use crate::generator::{
  document::operation::render_operation,
  metrics::GenerationWarning,
  schema::ExpansionCache,
};

#[test]
fn test_operation_document_sections() {
  let document = json!({
    "paths": {
      "/pets": {
        "post": {
          "operationId": "createPet",
          "summary": "Create a pet",
          "description": "Adds a pet to the store.",
          "requestBody": {
            "description": "The pet to add",
            "content": {
              "application/json": {
                "schema": { "$ref": "#/components/schemas/Pet" }
              }
            }
          },
          "responses": {
            "201": {
              "description": "Created",
              "content": {
                "application/json": {
                  "schema": { "$ref": "#/components/schemas/Pet" }
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
          "properties": { "name": { "type": "string" } }
        }
      }
    }
  });
  let entry = first_operation(&document);
  let cache = ExpansionCache::new();

  let rendered = render_operation(&document, &cache, &entry);

  assert!(rendered.warnings.is_empty());
  assert_eq!(rendered.models_documented, 1);
  assert_eq!(rendered.model_keys, vec!["#/components/schemas/pet".to_string()]);

  let markdown = &rendered.markdown;
  assert!(markdown.starts_with("# POST /pets\n"));
  assert!(markdown.contains("Create a pet"));
  assert!(markdown.contains("Adds a pet to the store."));
  assert!(markdown.contains("**Operation ID:** `createpet`"));
  assert!(markdown.contains("## Request Body"));
  assert!(markdown.contains("The pet to add"));
  assert!(markdown.contains("**Content** `application/json`:"));
  assert!(markdown.contains("## Responses"));
  assert!(markdown.contains("### 201"));
  assert!(markdown.contains("## Models"));
  assert!(markdown.contains("### Pet"));
  // The body schema is a link; the definition is expanded once, in Models.
  assert_eq!(markdown.matches("```\n$ref: #/components/schemas/Pet\n```").count(), 2);
  assert_eq!(markdown.matches("type: object").count(), 1);
}

#[test]
fn test_deprecated_operation_is_flagged() {
  let document = json!({
    "paths": {
      "/old": {
        "get": { "operationId": "oldOp", "deprecated": true, "responses": {} }
      }
    }
  });
  let entry = first_operation(&document);
  let cache = ExpansionCache::new();

  let rendered = render_operation(&document, &cache, &entry);

  assert!(rendered.markdown.contains("> **Deprecated.**"));
}

#[test]
fn test_referenced_parameter_is_resolved() {
  let document = json!({
    "paths": {
      "/pets": {
        "get": {
          "operationId": "listPets",
          "parameters": [
            { "$ref": "#/components/parameters/Limit" },
            { "$ref": "#/components/parameters/Missing" }
          ]
        }
      }
    },
    "components": {
      "parameters": {
        "Limit": {
          "name": "limit",
          "in": "query",
          "required": true,
          "description": "Page size",
          "schema": { "type": "integer" }
        }
      }
    }
  });
  let entry = first_operation(&document);
  let cache = ExpansionCache::new();

  let rendered = render_operation(&document, &cache, &entry);

  assert!(rendered.markdown.contains("| limit | query | yes | integer | Page size |"));
  assert!(
    rendered
      .markdown
      .contains("| `#/components/parameters/Missing` | - | - | - | unresolvable reference |")
  );
  assert_eq!(
    rendered.warnings,
    vec![GenerationWarning::UnresolvedParameter {
      operation_id: "listpets".to_string(),
      reference: "#/components/parameters/Missing".to_string(),
    }]
  );
}

#[test]
fn test_referenced_request_body_seeds_models() {
  let document = json!({
    "paths": {
      "/orders": {
        "post": {
          "operationId": "placeOrder",
          "requestBody": { "$ref": "#/components/requestBodies/NewOrder" },
          "responses": { "201": { "description": "placed" } }
        }
      }
    },
    "components": {
      "requestBodies": {
        "NewOrder": {
          "content": {
            "application/json": {
              "schema": { "$ref": "#/components/schemas/Order" }
            }
          }
        }
      },
      "schemas": {
        "Order": { "type": "object", "properties": { "sku": { "type": "string" } } }
      }
    }
  });
  let entry = first_operation(&document);
  let cache = ExpansionCache::new();

  let rendered = render_operation(&document, &cache, &entry);

  assert!(rendered.warnings.is_empty());
  assert!(rendered.markdown.contains("### Order"));
  assert_eq!(rendered.models_documented, 1);
}

#[test]
fn test_parameter_type_shows_model_name() {
  let document = json!({
    "paths": {
      "/search": {
        "get": {
          "operationId": "search",
          "parameters": [
            { "name": "filter", "in": "query", "schema": { "$ref": "#/components/schemas/Filter" } }
          ]
        }
      }
    },
    "components": {
      "schemas": { "Filter": { "type": "string" } }
    }
  });
  let entry = first_operation(&document);
  let cache = ExpansionCache::new();

  let rendered = render_operation(&document, &cache, &entry);

  assert!(rendered.markdown.contains("| filter | query | no | Filter | - |"));
}
