use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::operation_registry::{OperationFilter, OperationRegistry},
  ui::{Colors, colors::to_comfy, term_width},
  utils::spec::SpecLoader,
};

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let registry = OperationRegistry::from_document(&document, &OperationFilter::default());

  let mut operations: Vec<(String, String, String)> = registry
    .entries()
    .iter()
    .map(|entry| (entry.stable_id.clone(), entry.method.clone(), entry.path.clone()))
    .collect();
  operations.sort_by(|a, b| a.0.cmp(&b.0));

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  header.add_cell(Cell::new("OPERATION ID").fg(to_comfy(colors.label())));
  header.add_cell(Cell::new("METHOD").fg(to_comfy(colors.label())));
  header.add_cell(Cell::new("PATH").fg(to_comfy(colors.label())));
  table.set_header(header);

  for (operation_id, method, path) in operations {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation_id)
        .fg(to_comfy(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(to_comfy(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(to_comfy(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
