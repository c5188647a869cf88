//! Column-name normalization and typed record extraction.
//!
//! Header names in the wild carry stray whitespace and mixed case
//! ("Startup Name", " Revenue (M USD)"). All pipeline code refers to
//! columns by their normalized names; [`normalize_name`] is the single
//! place that mapping is defined.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::{FieldValue, RawTable, StartupDataset, StartupRecord};
use crate::data::DataError;

pub const COL_NAME: &str = "startup_name";
pub const COL_INDUSTRY: &str = "industry";
pub const COL_REVENUE: &str = "revenue_(m_usd)";
pub const COL_FUNDING: &str = "funding_amount_(m_usd)";
pub const COL_VALUATION: &str = "valuation_(m_usd)";
pub const COL_EMPLOYEES: &str = "employees";
pub const COL_PROFITABLE: &str = "profitable";
pub const COL_MARKET_SHARE: &str = "market_share_(%)";
pub const COL_FUNDING_ROUNDS: &str = "funding_rounds";

/// Columns the metrics pipeline requires, by normalized name.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_NAME,
    COL_INDUSTRY,
    COL_REVENUE,
    COL_FUNDING,
    COL_VALUATION,
    COL_EMPLOYEES,
    COL_PROFITABLE,
    COL_MARKET_SHARE,
    COL_FUNDING_ROUNDS,
];

/// Normalize a column name: trim, lowercase, every whitespace character
/// becomes an underscore.
///
/// Idempotent: the output contains no whitespace and no uppercase, so
/// `normalize_name(normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Validate a raw table against the required schema and extract typed
/// records.
///
/// Fails with [`DataError::MissingColumn`] before any row is touched when a
/// required column is absent post-normalization, and with
/// [`DataError::InvalidValue`] on the first non-numeric cell in a numeric
/// column. Empty numeric cells parse to NaN (coerced to 0 later, inside the
/// scoring feature matrix).
pub fn build_dataset(table: &RawTable) -> Result<StartupDataset, DataError> {
    // normalized name → raw header; first occurrence wins on collision
    let mut by_norm: BTreeMap<String, &str> = BTreeMap::new();
    for header in &table.headers {
        by_norm.entry(normalize_name(header)).or_insert(header.as_str());
    }

    for required in REQUIRED_COLUMNS {
        if !by_norm.contains_key(required) {
            return Err(DataError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let required: BTreeSet<&str> = REQUIRED_COLUMNS.into_iter().collect();
    let mut records = Vec::with_capacity(table.rows.len());
    for (row_no, row) in table.rows.iter().enumerate() {
        records.push(extract_record(row, &by_norm, &required, row_no)?);
    }
    Ok(StartupDataset::from_records(records))
}

fn cell<'a>(
    row: &'a BTreeMap<String, FieldValue>,
    by_norm: &BTreeMap<String, &str>,
    col: &str,
) -> &'a FieldValue {
    by_norm
        .get(col)
        .and_then(|raw| row.get(*raw))
        .unwrap_or(&FieldValue::Null)
}

fn extract_record(
    row: &BTreeMap<String, FieldValue>,
    by_norm: &BTreeMap<String, &str>,
    required: &BTreeSet<&str>,
    row_no: usize,
) -> Result<StartupRecord, DataError> {
    let numeric = |col: &str| -> Result<f64, DataError> {
        let value = cell(row, by_norm, col);
        match value {
            FieldValue::Null => Ok(f64::NAN),
            _ => value.as_f64().ok_or_else(|| DataError::InvalidValue {
                row: row_no,
                column: col.to_string(),
                value: value.to_string(),
            }),
        }
    };

    let text = |col: &str| -> String {
        match cell(row, by_norm, col) {
            FieldValue::Null => String::new(),
            other => other.to_string(),
        }
    };

    // `profitable` shows up as 0/1 in some exports and true/false in others.
    let profitable = match cell(row, by_norm, COL_PROFITABLE) {
        FieldValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => numeric(COL_PROFITABLE)?,
    };

    // Grouping key only; an empty cell counts as zero rounds.
    let funding_rounds = match cell(row, by_norm, COL_FUNDING_ROUNDS) {
        FieldValue::Null => 0,
        FieldValue::Integer(i) => *i,
        FieldValue::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
        other => {
            return Err(DataError::InvalidValue {
                row: row_no,
                column: COL_FUNDING_ROUNDS.to_string(),
                value: other.to_string(),
            })
        }
    };

    let mut extra = BTreeMap::new();
    for (raw_name, value) in row {
        let norm = normalize_name(raw_name);
        if !required.contains(norm.as_str()) {
            extra.insert(norm, value.clone());
        }
    }

    Ok(StartupRecord {
        name: text(COL_NAME),
        industry: text(COL_INDUSTRY),
        revenue_musd: numeric(COL_REVENUE)?,
        funding_musd: numeric(COL_FUNDING)?,
        valuation_musd: numeric(COL_VALUATION)?,
        employees: numeric(COL_EMPLOYEES)?,
        profitable,
        market_share_pct: numeric(COL_MARKET_SHARE)?,
        funding_rounds,
        extra,
    })
}
