//! Data layer: core types, loading, schema validation, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawTable (raw headers, dynamic cells)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema   │  normalize names, validate, type → StartupDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  industry + min-score predicates → view indices
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;

use thiserror::Error;

/// Failures raised while loading or validating a dataset.
///
/// `MissingColumn` and `InvalidValue` are the contract's schema-error and
/// value-error classes; both are fatal for the load, nothing partial is
/// produced. Undefined arithmetic (division by zero, zero-variance
/// normalization) is deliberately NOT an error — the pipeline coerces those
/// to 0.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// Required column absent after name normalization. The dataset is
    /// incompatible with the pipeline.
    #[error("dataset incompatible: missing required column '{column}'")]
    MissingColumn { column: String },

    /// Non-numeric text where the pipeline requires a number.
    #[error("row {row}: column '{column}' expected a number, got '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}
