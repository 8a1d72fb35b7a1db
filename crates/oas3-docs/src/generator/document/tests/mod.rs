mod operation;

use serde_json::Value;

use crate::generator::operation_registry::{OperationFilter, OperationRegistry};

pub(super) fn first_operation(document: &Value) -> crate::generator::operation_registry::OperationEntry {
  let registry = OperationRegistry::from_document(document, &OperationFilter::default());
  registry.entries().first().expect("document should define an operation").clone()
}
