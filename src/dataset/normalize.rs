//! Column header normalization
//!
//! Raw headers are classified by an ordered list of substring rules; the first
//! rule that matches decides the canonical name. Headers matching no rule are
//! passed through unchanged.
//!
//! | Order | Rule (case-insensitive) | Canonical name |
//! |-------|-------------------------|----------------|
//! | 1 | contains "company" or "name" | `Company` |
//! | 2 | contains "symbol" or "ticker" | `Symbol` |
//! | 3 | contains "sector", not "sub" | `GICS_Sector` |
//! | 4 | contains "sub" and "industry" | `GICS_Sub_Industry` |
//!
//! Rules 3 and 4 partition headers around "sub", so "GICS Sub-Industry" never
//! lands in the sector column.

use crate::dataset::{Dataset, RawTable};
use std::fmt;

/// One of the normalized output column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Company,
    Symbol,
    GicsSector,
    GicsSubIndustry,
}

impl CanonicalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Company => "Company",
            CanonicalField::Symbol => "Symbol",
            CanonicalField::GicsSector => "GICS_Sector",
            CanonicalField::GicsSubIndustry => "GICS_Sub_Industry",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Rule = (fn(&str) -> bool, CanonicalField);

/// Evaluated top to bottom against the lowercased header
const RULES: &[Rule] = &[
    (is_company, CanonicalField::Company),
    (is_symbol, CanonicalField::Symbol),
    (is_sector, CanonicalField::GicsSector),
    (is_sub_industry, CanonicalField::GicsSubIndustry),
];

fn is_company(header: &str) -> bool {
    header.contains("company") || header.contains("name")
}

fn is_symbol(header: &str) -> bool {
    header.contains("symbol") || header.contains("ticker")
}

fn is_sector(header: &str) -> bool {
    header.contains("sector") && !header.contains("sub")
}

fn is_sub_industry(header: &str) -> bool {
    header.contains("sub") && header.contains("industry")
}

/// Classifies a single raw header
///
/// # Example
///
/// ```
/// use index_constituents::dataset::{canonical_name, CanonicalField};
///
/// assert_eq!(canonical_name("Ticker"), Some(CanonicalField::Symbol));
/// assert_eq!(canonical_name("GICS Sub-Industry"), Some(CanonicalField::GicsSubIndustry));
/// assert_eq!(canonical_name("Headquarters"), None);
/// ```
pub fn canonical_name(header: &str) -> Option<CanonicalField> {
    let lowered = header.to_lowercase();
    RULES
        .iter()
        .find(|(matches, _)| matches(&lowered))
        .map(|(_, field)| *field)
}

/// Renames computed for a set of headers, in header order
///
/// Only headers that matched a rule appear; the rest keep their label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    renames: Vec<(String, CanonicalField)>,
}

impl ColumnMapping {
    /// Canonical name for a raw header, if it was matched
    pub fn get(&self, header: &str) -> Option<CanonicalField> {
        self.renames
            .iter()
            .find(|(original, _)| original == header)
            .map(|(_, field)| *field)
    }

    /// Label a header carries after renaming
    pub fn apply(&self, header: &str) -> String {
        self.get(header)
            .map(|field| field.as_str().to_string())
            .unwrap_or_else(|| header.to_string())
    }

    pub fn renames(&self) -> &[(String, CanonicalField)] {
        &self.renames
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

impl fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (original, field)) in self.renames.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", original, field.as_str())?;
        }
        f.write_str("}")
    }
}

/// Computes the header → canonical name mapping and logs it
pub fn column_mapping(headers: &[String]) -> ColumnMapping {
    let mut renames: Vec<(String, CanonicalField)> = Vec::new();
    for header in headers {
        if renames.iter().any(|(original, _)| original == header) {
            continue;
        }
        if let Some(field) = canonical_name(header) {
            renames.push((header.clone(), field));
        }
    }

    let mapping = ColumnMapping { renames };
    tracing::info!("Column mapping: {}", mapping);
    mapping
}

/// Relabels the columns of a raw table
///
/// When two columns end up with the same label the later column wins: the
/// earlier one is dropped and a warning names it.
pub fn normalize(raw: RawTable) -> Dataset {
    let mapping = column_mapping(&raw.headers);
    let renamed: Vec<String> = raw.headers.iter().map(|h| mapping.apply(h)).collect();

    let keep: Vec<bool> = renamed
        .iter()
        .enumerate()
        .map(|(i, name)| !renamed[i + 1..].contains(name))
        .collect();

    for (i, kept) in keep.iter().enumerate() {
        if !kept {
            tracing::warn!(
                "Column '{}' (raw header '{}') is overwritten by a later column with the same name",
                renamed[i],
                raw.headers[i]
            );
        }
    }

    let columns = select(renamed, &keep);
    let rows = raw.rows.into_iter().map(|row| select(row, &keep)).collect();

    Dataset::new(columns, rows)
}

fn select(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter_map(|(value, kept)| kept.then_some(value))
        .collect()
}
