use serde_json::Value;
use thiserror::Error;

/// Prefix every same-document pointer starts with.
const LOCAL_REF_PREFIX: &str = "#/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
  #[error("reference '{reference}' not found: missing segment '{segment}'")]
  ReferenceNotFound { reference: String, segment: String },
  #[error("unsupported reference '{reference}': only same-document '#/' pointers are resolvable")]
  UnsupportedReference { reference: String },
}

/// Resolves a same-document pointer against the root of the contract tree.
///
/// The pointer is split on `/` after the `#/` prefix and each segment descends
/// one level by object-key lookup. The schema graph never requires array-index
/// navigation, so a non-object intermediate node fails the lookup the same way
/// a missing key does.
pub fn resolve_pointer<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, ResolveError> {
  let Some(pointer) = reference.strip_prefix(LOCAL_REF_PREFIX) else {
    return Err(ResolveError::UnsupportedReference {
      reference: reference.to_string(),
    });
  };

  let mut current = root;
  for segment in pointer.split('/') {
    current = current
      .as_object()
      .and_then(|fields| fields.get(segment))
      .ok_or_else(|| ResolveError::ReferenceNotFound {
        reference: reference.to_string(),
        segment: segment.to_string(),
      })?;
  }

  Ok(current)
}
