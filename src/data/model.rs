use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the raw table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes off the wire formats.
/// Used in `BTreeMap` / `BTreeSet` downstream so `FieldValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::String(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl FieldValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – parsed rows before schema validation
// ---------------------------------------------------------------------------

/// The loader's output: header names exactly as they appear in the source
/// file, and one value map per row keyed by those raw names.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, FieldValue>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// StartupRecord – one validated row
// ---------------------------------------------------------------------------

/// A single startup (one row of the source table) after column-name
/// normalization and type extraction.
///
/// Numeric cells that were empty in the source parse to NaN; the scoring
/// pipeline coerces those to 0 inside its feature matrix, but the raw value
/// is kept here untouched.
#[derive(Debug, Clone)]
pub struct StartupRecord {
    pub name: String,
    pub industry: String,
    /// Annual revenue in millions of USD.
    pub revenue_musd: f64,
    /// Total funding raised in millions of USD. May be zero.
    pub funding_musd: f64,
    /// Latest valuation in millions of USD.
    pub valuation_musd: f64,
    /// Headcount. May be zero.
    pub employees: f64,
    /// 1.0 if profitable, 0.0 if not. Boolean source cells are accepted.
    pub profitable: f64,
    pub market_share_pct: f64,
    pub funding_rounds: i64,
    /// Columns not required by the pipeline, keyed by normalized name.
    pub extra: BTreeMap<String, FieldValue>,
}

// ---------------------------------------------------------------------------
// StartupDataset – the complete validated dataset
// ---------------------------------------------------------------------------

/// The full typed dataset with the distinct-industry index precomputed.
#[derive(Debug, Clone)]
pub struct StartupDataset {
    /// All startups (rows), in source order.
    pub records: Vec<StartupRecord>,
    /// Sorted set of distinct industry values.
    pub industries: BTreeSet<String>,
}

impl StartupDataset {
    /// Build the industry index from validated records.
    pub fn from_records(records: Vec<StartupRecord>) -> Self {
        let industries = records.iter().map(|r| r.industry.clone()).collect();
        StartupDataset {
            records,
            industries,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Enriched dataset – records plus derived columns and the unicorn score
// ---------------------------------------------------------------------------

/// Min/max of one feature column over the full dataset, as used by the
/// score normalization. Kept on the enriched dataset for report provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
}

/// A startup with all derived columns populated.
///
/// The ratio fields are always finite: divisions by zero are defined to be
/// 0 ("no signal") rather than infinity.
#[derive(Debug, Clone)]
pub struct EnrichedRecord {
    pub record: StartupRecord,
    /// revenue / funding. 0 when funding is zero.
    pub revenue_to_funding: f64,
    /// valuation / employees. 0 when headcount is zero.
    pub valuation_per_employee: f64,
    /// valuation / funding. 0 when funding is zero.
    pub valuation_to_funding: f64,
    /// Valuation of at least $1000M.
    pub is_unicorn: bool,
    /// Weighted composite of five normalized features, in [0, 1].
    pub unicorn_score: f64,
}

/// Output of the metrics pipeline: same rows in the same order as the
/// source dataset, scored. Immutable for the rest of the session; a reload
/// replaces the whole value.
#[derive(Debug, Clone)]
pub struct EnrichedDataset {
    pub records: Vec<EnrichedRecord>,
    /// Sorted set of distinct industry values (selector control contents).
    pub industries: BTreeSet<String>,
    /// Per-feature min/max used for normalization, in feature-matrix order.
    pub feature_stats: [FeatureStats; 5],
}

impl EnrichedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct industries, for populating a selector control.
    pub fn industry_list(&self) -> Vec<&str> {
        self.industries.iter().map(|s| s.as_str()).collect()
    }
}
