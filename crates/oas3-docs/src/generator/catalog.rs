use std::collections::{BTreeMap, BTreeSet};

use indexmap::{IndexMap, IndexSet};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};
use serde_json::Value;

use crate::generator::schema::{ModelRef, collect_model_refs};

/// Document sections that hold named schema definitions, with the pointer
/// prefix each contributes.
const CATALOG_SECTIONS: [(&[&str], &str); 2] = [
  (&["components", "schemas"], "#/components/schemas/"),
  (&["definitions"], "#/definitions/"),
];

/// One named schema definition from the contract.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
  pub name: String,
  pub model: ModelRef,
  pub node: Value,
}

/// Catalog of every named schema definition in the contract.
///
/// Collects `components.schemas` and `definitions` in declaration order,
/// tracks the dependency edges between definitions, and detects reference
/// cycles for statistics reporting.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
  entries: IndexMap<String, CatalogEntry>,
  dependencies: BTreeMap<String, BTreeSet<String>>,
  cyclic: BTreeSet<String>,
}

impl SchemaCatalog {
  pub fn from_document(document: &Value) -> Self {
    let mut catalog = Self::default();

    for (path, prefix) in CATALOG_SECTIONS {
      let mut section = document;
      let mut present = true;
      for segment in path {
        match section.get(segment) {
          Some(next) => section = next,
          None => {
            present = false;
            break;
          }
        }
      }
      if !present {
        continue;
      }

      if let Some(schemas) = section.as_object() {
        for (name, node) in schemas {
          let Some(model) = ModelRef::parse(&format!("{prefix}{name}")) else {
            continue;
          };
          catalog.entries.entry(model.key().to_string()).or_insert(CatalogEntry {
            name: name.clone(),
            model,
            node: node.clone(),
          });
        }
      }
    }

    catalog.build_dependencies();
    catalog
  }

  fn build_dependencies(&mut self) {
    for entry in self.entries.values() {
      let mut refs = IndexSet::new();
      collect_model_refs(&entry.node, &mut refs);
      let deps = refs
        .into_iter()
        .filter(|model| self.entries.contains_key(model.key()))
        .map(|model| model.key().to_string())
        .collect();
      self.dependencies.insert(entry.model.key().to_string(), deps);
    }
  }

  /// Detects reference cycles among named definitions.
  ///
  /// Returns one chain per strongly connected component that is larger than a
  /// single node or carries a self edge, using display names.
  pub fn detect_cycles(&mut self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.dependencies {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    let cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        scc
          .into_iter()
          .map(|key| self.display_name(key).to_string())
          .collect()
      })
      .collect();

    for cycle in &cycles {
      for name in cycle {
        self.cyclic.insert(name.clone());
      }
    }

    cycles
  }

  fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
    self.entries.get(key).map_or(key, |entry| entry.name.as_str())
  }

  pub fn is_cyclic(&self, name: &str) -> bool {
    self.cyclic.contains(name)
  }

  /// Entries in declaration order, `components.schemas` before `definitions`.
  pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
    self.entries.values()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
