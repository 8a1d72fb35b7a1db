use serde_json::{Map, Value};

/// Combinator keywords a schema node may compose sub-schemas with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorKind {
  OneOf,
  AnyOf,
  AllOf,
}

impl CombinatorKind {
  pub fn keyword(self) -> &'static str {
    match self {
      Self::OneOf => "oneOf",
      Self::AnyOf => "anyOf",
      Self::AllOf => "allOf",
    }
  }

  /// Positional label prefix for branch entries.
  pub fn branch_label(self) -> &'static str {
    match self {
      Self::OneOf | Self::AnyOf => "option",
      Self::AllOf => "part",
    }
  }
}

/// The closed set of shapes a schema fragment can take.
///
/// Classification is a fixed priority ladder, first match wins, so the
/// fallback case is an intentional, visible branch rather than the residue of
/// ad hoc property probing.
#[derive(Debug)]
pub enum SchemaShape<'a> {
  /// A `$ref` node; mutually exclusive with the concrete shapes.
  Reference(&'a str),
  Object(&'a Map<String, Value>),
  Array(&'a Map<String, Value>),
  Primitive {
    type_name: &'a str,
    fields: &'a Map<String, Value>,
  },
  Combinator {
    kind: CombinatorKind,
    branches: &'a [Value],
  },
  /// Anything else: empty fragments, bare annotations, malformed nodes.
  Unknown(&'a Value),
}

/// Classifies a schema fragment into its shape.
///
/// A node with no `type` facet still counts as an object when it declares
/// `properties`, and as an array when it declares `items`; combinators are
/// considered only after that, an explicit scalar `type` beats a combinator.
pub fn classify(node: &Value) -> SchemaShape<'_> {
  let Some(fields) = node.as_object() else {
    return SchemaShape::Unknown(node);
  };

  if let Some(reference) = fields.get("$ref").and_then(Value::as_str) {
    return SchemaShape::Reference(reference);
  }

  match fields.get("type").and_then(Value::as_str) {
    Some("object") => return SchemaShape::Object(fields),
    Some("array") => return SchemaShape::Array(fields),
    Some(type_name) => return SchemaShape::Primitive { type_name, fields },
    None => {}
  }

  if fields.contains_key("properties") {
    return SchemaShape::Object(fields);
  }
  if fields.contains_key("items") {
    return SchemaShape::Array(fields);
  }

  for (keyword, kind) in [
    ("oneOf", CombinatorKind::OneOf),
    ("anyOf", CombinatorKind::AnyOf),
    ("allOf", CombinatorKind::AllOf),
  ] {
    if let Some(branches) = fields.get(keyword).and_then(Value::as_array) {
      return SchemaShape::Combinator {
        kind,
        branches,
      };
    }
  }

  SchemaShape::Unknown(node)
}
