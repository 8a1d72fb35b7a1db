use std::collections::VecDeque;

use indexmap::IndexSet;
use serde_json::Value;

use super::{
  reference::{ModelRef, collect_model_refs},
  resolver::resolve_pointer,
};

/// Computes the set of named models transitively reachable from a seed set.
///
/// Breadth-first over the reference graph: pop a reference, resolve it, scan
/// the entire resolved subtree for further model references, enqueue the
/// unseen ones. Termination holds on any cyclic graph because the result set
/// only grows and the universe of named definitions is finite.
///
/// The returned set keeps first-discovery order (seeds first, then discovery
/// order), which is the committed iteration order for emitting model
/// sections. A reference that cannot be resolved is skipped; the rest of the
/// closure is still computed.
pub fn reference_closure(root: &Value, seeds: &IndexSet<ModelRef>) -> IndexSet<ModelRef> {
  let mut reachable = seeds.clone();
  let mut frontier: VecDeque<ModelRef> = seeds.iter().cloned().collect();

  while let Some(model) = frontier.pop_front() {
    let Ok(target) = resolve_pointer(root, model.raw()) else {
      continue;
    };

    let mut nested = IndexSet::new();
    collect_model_refs(target, &mut nested);
    for candidate in nested {
      if reachable.insert(candidate.clone()) {
        frontier.push_back(candidate);
      }
    }
  }

  reachable
}
