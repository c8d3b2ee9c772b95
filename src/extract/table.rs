//! Conversion of a `<table>` element into a [`RawTable`]

use crate::dataset::RawTable;
use scraper::ElementRef;

/// Rows belonging to `table` itself, in document order
///
/// Rows inside `thead`/`tbody`/`tfoot` count; rows of nested tables do not.
pub fn table_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == "tr" && owning_table(*el) == Some(table))
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

/// Text of each `th`/`td` cell in a row, trimmed
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "th" | "td"))
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

/// Converts a table element into headers plus data rows
///
/// The first row with at least one cell supplies the headers; cell-less rows
/// before it are skipped. Blank header labels become `Unnamed: <index>`.
/// Data rows are padded with empty cells or cut to the header width.
pub fn extract_table(table: ElementRef<'_>) -> RawTable {
    let mut rows = table_rows(table).map(row_cells).peekable();

    let mut skipped = 0;
    while rows.next_if(|cells| cells.is_empty()).is_some() {
        skipped += 1;
    }
    if skipped > 0 {
        tracing::warn!("Skipped {} leading row(s) without cells before the header", skipped);
    }

    let headers: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            if label.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                label
            }
        })
        .collect();

    if headers.is_empty() {
        tracing::warn!("Table has no cells to take headers from");
    }

    let width = headers.len();
    let rows: Vec<Vec<String>> = rows
        .enumerate()
        .map(|(i, mut cells)| {
            if cells.len() > width {
                tracing::debug!(
                    "Row {} has {} cells, dropping {} beyond the header width",
                    i + 1,
                    cells.len(),
                    cells.len() - width
                );
            }
            cells.resize(width, String::new());
            cells
        })
        .collect();

    RawTable { headers, rows }
}
