use std::{
  collections::BTreeMap,
  sync::{PoisonError, RwLock},
};

/// Run-wide cache of canonical schema expansions.
///
/// Maps a reference identity (case-folded pointer string) to its rendering at
/// baseline indentation, so the text can be re-indented for any call site.
/// One instance lives for the duration of a generation run and is shared,
/// behind an `Arc`, by every per-operation worker.
///
/// Writes are idempotent: expansion is a pure function of the contract tree,
/// so two workers racing on the same miss store equal values and the last
/// write leaves an equally-correct entry. The lock guards the map structure,
/// not the algorithm; duplicate recomputation on a miss race is wasted work,
/// never a correctness hazard.
#[derive(Debug, Default)]
pub struct ExpansionCache {
  entries: RwLock<BTreeMap<String, String>>,
}

impl ExpansionCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the stored canonical rendering for a reference identity.
  pub fn get(&self, key: &str) -> Option<String> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    entries.get(key).cloned()
  }

  /// Stores a canonical rendering, replacing any existing (equal) entry.
  pub fn insert(&self, key: String, rendering: String) {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    entries.insert(key, rendering);
  }

  /// Number of distinct references expanded so far.
  pub fn len(&self) -> usize {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
