use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub operations_documented: usize,
  pub models_documented: usize,
  pub schemas_in_catalog: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub orphaned_schemas_count: usize,
  pub expansions_cached: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_operation(&mut self) {
    self.operations_documented += 1;
  }

  pub fn record_models(&mut self, count: usize) {
    self.models_documented += count;
  }

  pub fn record_catalog_size(&mut self, count: usize) {
    self.schemas_in_catalog = count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_orphaned_schemas(&mut self, count: usize) {
    self.orphaned_schemas_count = count;
  }

  pub fn record_cached_expansions(&mut self, count: usize) {
    self.expansions_cached = count;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal degradations collected while documenting a contract.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "[{operation_id}] model reference '{reference}' could not be resolved")]
  UnresolvedModel { operation_id: String, reference: String },
  #[strum(to_string = "[{operation_id}] parameter reference '{reference}' could not be resolved")]
  UnresolvedParameter { operation_id: String, reference: String },
  #[strum(to_string = "[{operation_id}] body reference '{reference}' could not be resolved")]
  UnresolvedFragment { operation_id: String, reference: String },
}
