//! Candidate table selection
//!
//! Two heuristics, tried in order:
//! 1. The first `<table>` following the first `h2`/`h3` heading whose text
//!    contains the heading keyword ("component" by default)
//! 2. Among tables with the marker class, the one with the most rows

use crate::config::ExtractConfig;
use crate::extract::table::table_rows;
use scraper::{ElementRef, Html};
use std::fmt;

/// Which heuristic produced the chosen table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Heading,
    LargestMarked,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Heading => f.write_str("heading"),
            Strategy::LargestMarked => f.write_str("largest marked table"),
        }
    }
}

/// Selects the constituent table, or `None` when neither heuristic applies
pub fn locate_table<'a>(
    document: &'a Html,
    config: &ExtractConfig,
) -> Option<(ElementRef<'a>, Strategy)> {
    if let Some(table) = table_after_heading(document, &config.heading_keyword) {
        return Some((table, Strategy::Heading));
    }

    largest_marked_table(document, &config.table_class).map(|t| (t, Strategy::LargestMarked))
}

/// Walks the document in order: finds the first matching heading, then the
/// next table element after it
fn table_after_heading<'a>(document: &'a Html, keyword: &str) -> Option<ElementRef<'a>> {
    let keyword = keyword.to_lowercase();
    let mut heading_found = false;

    for element in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        match element.value().name() {
            "h2" | "h3" if !heading_found => {
                let text = element.text().collect::<String>().to_lowercase();
                if text.contains(&keyword) {
                    tracing::debug!("Found constituents heading: {}", text.trim());
                    heading_found = true;
                }
            }
            "table" if heading_found => return Some(element),
            _ => {}
        }
    }

    if heading_found {
        tracing::debug!("Heading matched but no table follows it");
    }
    None
}

/// Picks the marked table with the most rows; the first one wins ties
///
/// Classes are compared as plain tokens, so names that are not valid CSS
/// identifiers (such as `2024`) still match.
fn largest_marked_table<'a>(document: &'a Html, class: &str) -> Option<ElementRef<'a>> {
    let marked = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "table" && el.value().classes().any(|c| c == class));

    let mut best: Option<(ElementRef<'a>, usize)> = None;
    for table in marked {
        let rows = table_rows(table).count();
        tracing::debug!("Candidate .{} table with {} rows", class, rows);
        if best.map_or(true, |(_, most)| rows > most) {
            best = Some((table, rows));
        }
    }

    best.map(|(table, _)| table)
}
