use std::{collections::HashSet, path::PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::orchestrator::{DocgenConfig, GeneratedOutput, GenerationStats, Orchestrator},
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub verbose: bool,
  pub quiet: bool,
  pub all_schemas: bool,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input,
      output,
      all_schemas,
      only,
      exclude,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      output,
      verbose,
      quiet,
      all_schemas,
      only_operations: only.map(|ops| ops.into_iter().collect()),
      excluded_operations: exclude.map(|ops| ops.into_iter().collect()),
    }
  }

  async fn load_document(&self) -> anyhow::Result<serde_json::Value> {
    SpecLoader::open(&self.input).await?.parse()
  }

  fn create_orchestrator(&self, document: serde_json::Value) -> Orchestrator {
    let config = DocgenConfig::builder()
      .all_schemas(self.all_schemas)
      .maybe_only_operations(self.only_operations.clone())
      .maybe_excluded_operations(self.excluded_operations.clone())
      .build();

    Orchestrator::new(document, config)
  }

  async fn write_output(&self, output: &GeneratedOutput) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&self.output).await?;

    for document in &output.documents {
      tokio::fs::write(self.output.join(&document.file_name), &document.markdown).await?;
    }
    tokio::fs::write(self.output.join("index.md"), &output.index).await?;
    if let Some(model_catalog) = &output.model_catalog {
      tokio::fs::write(self.output.join("models.md"), model_catalog).await?;
    }

    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating Markdown documentation...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Operations documented:", stats.operations_documented.to_string());
    self.stat("Models documented:", stats.models_documented.to_string());
    self.stat("Schemas in catalog:", stats.schemas_in_catalog.to_string());
    self.print_cycles(stats);
    self.print_orphaned_schemas(stats);
    if stats.expansions_cached > 0 && self.config.verbose {
      self.stat("Expansions cached:", stats.expansions_cached.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_orphaned_schemas(&self, stats: &GenerationStats) {
    if stats.orphaned_schemas_count > 0 && self.config.verbose {
      self.stat("Orphaned schemas:", stats.orphaned_schemas_count.to_string());
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || !self.config.verbose {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated Markdown documentation".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_docs(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_document().await?;

  logger.log_generating();
  let orchestrator = config.create_orchestrator(document);
  let output = orchestrator.generate().await?;

  logger.print_statistics(&output.stats);
  logger.log_writing();
  config.write_output(&output).await?;

  logger.log_success();
  Ok(())
}
