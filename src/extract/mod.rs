//! Table extraction from the fetched page
//!
//! Parses the HTML, picks the constituent table and converts it into a
//! [`RawTable`](crate::dataset::RawTable).

mod locator;
mod table;

pub use locator::{locate_table, Strategy};
pub use table::{extract_table, table_rows};

use crate::config::ExtractConfig;
use crate::dataset::RawTable;
use crate::ScrapeError;
use scraper::Html;

/// Parses `html` and extracts the constituent table
///
/// # Returns
///
/// * `Ok(RawTable)` - The chosen table, headers unchanged
/// * `Err(ScrapeError::NoSuitableTable)` - Neither heuristic found a table
pub fn find_constituent_table(html: &str, config: &ExtractConfig) -> Result<RawTable, ScrapeError> {
    let document = Html::parse_document(html);

    let Some((table, strategy)) = locate_table(&document, config) else {
        let err = ScrapeError::NoSuitableTable;
        tracing::error!("{}", err);
        return Err(err);
    };

    let raw = extract_table(table);
    tracing::info!(
        "Selected table by {} with {} rows",
        strategy,
        table_rows(table).count()
    );
    tracing::info!("Columns: {:?}", raw.headers);

    Ok(raw)
}
