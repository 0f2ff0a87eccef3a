use comfy_table::{CellAlignment, ContentArrangement, Table as TextTable};

use crate::flightcodes::tools::error::Result;
use crate::flightcodes::tools::model::{Table, records_from_table};

/// Most rows ever printed, whatever limit the caller asks for.
pub const MAX_ROW_LIMIT: usize = 10;

fn capped_head(table: &Table, limit: usize) -> Table {
    table.head(limit.min(MAX_ROW_LIMIT))
}

/// Renders the first `limit` rows, never more than [`MAX_ROW_LIMIT`], with a
/// leading row index column.
pub fn render_table(table: &Table, limit: usize) -> String {
    let head = capped_head(table, limit);

    let mut text = TextTable::new();
    text.set_content_arrangement(ContentArrangement::Disabled);

    let mut header = Vec::with_capacity(head.width() + 1);
    header.push(String::new());
    header.extend(head.columns.iter().cloned());
    text.set_header(header);

    for (index, row) in head.rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(row.len() + 1);
        cells.push(index.to_string());
        cells.extend(row.iter().map(ToString::to_string));
        text.add_row(cells);
    }

    if let Some(column) = text.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    text.to_string()
}

/// Serialises the first `limit` rows, capped like [`render_table`], as a
/// pretty-printed JSON array of flight records.
pub fn render_json(table: &Table, limit: usize) -> Result<String> {
    let records = records_from_table(&capped_head(table, limit))?;
    Ok(serde_json::to_string_pretty(&records)?)
}
