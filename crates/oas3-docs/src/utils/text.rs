use itertools::Itertools;

/// Sanitizes free-form text into a stable snake_case identifier.
///
/// Runs of non-alphanumeric characters collapse into a single underscore,
/// leading and trailing separators are trimmed, letters are lowercased.
#[must_use]
pub fn sanitize_id(raw: &str) -> String {
  let mut id = String::with_capacity(raw.len());
  let mut pending_separator = false;

  for ch in raw.chars() {
    if ch.is_ascii_alphanumeric() {
      if pending_separator && !id.is_empty() {
        id.push('_');
      }
      pending_separator = false;
      id.push(ch.to_ascii_lowercase());
    } else {
      pending_separator = true;
    }
  }

  if id.is_empty() { "operation".to_string() } else { id }
}

/// Flattens text into a single Markdown table cell.
///
/// Newlines and runs of whitespace collapse to single spaces and pipe
/// characters are escaped so the cell cannot break the row.
#[must_use]
pub fn table_cell(text: &str) -> String {
  text.replace('|', "\\|").split_whitespace().join(" ")
}

/// Wraps rendered schema text in a fenced block.
#[must_use]
pub fn fenced(text: &str) -> String {
  format!("```\n{text}\n```")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sanitize_id_lowercases_and_collapses() {
    assert_eq!(sanitize_id("Find Pets -- By Status"), "find_pets_by_status");
  }

  #[test]
  fn test_sanitize_id_trims_separators() {
    assert_eq!(sanitize_id("__getPet__"), "getpet");
    assert_eq!(sanitize_id("get/pets/{petId}"), "get_pets_petid");
  }

  #[test]
  fn test_sanitize_id_empty_falls_back() {
    assert_eq!(sanitize_id("!!!"), "operation");
    assert_eq!(sanitize_id(""), "operation");
  }

  #[test]
  fn test_table_cell_flattens_whitespace() {
    assert_eq!(table_cell("multi\nline   text"), "multi line text");
  }

  #[test]
  fn test_table_cell_escapes_pipes() {
    assert_eq!(table_cell("a | b"), "a \\| b");
  }

  #[test]
  fn test_fenced_wraps_text() {
    assert_eq!(fenced("type: object"), "```\ntype: object\n```");
  }
}
