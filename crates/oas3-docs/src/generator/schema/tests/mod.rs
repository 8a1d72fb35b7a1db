mod closure;

use serde_json::{Value, json};

/// A small contract with a self-referential model, shared across the engine
/// tests.
pub(super) fn petstore_document() -> Value {
  json!({
    "openapi": "3.0.0",
    "info": { "title": "Petstore", "version": "1.0.0" },
    "components": {
      "schemas": {
        "Pet": {
          "type": "object",
          "properties": {
            "id": { "type": "integer", "format": "int64" },
            "name": { "type": "string" },
            "friend": { "$ref": "#/components/schemas/Pet" }
          }
        },
        "Address": { "type": "string" }
      },
      "parameters": {
        "Limit": { "type": "integer" }
      }
    }
  })
}
