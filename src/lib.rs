//! Startup ecosystem analytics.
//!
//! Loads a tabular dataset of startup records, derives ratio and flag
//! columns, computes a composite unicorn score over min-max-normalized
//! features, and exposes filtered views plus read-only summary queries for
//! presentation.
//!
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   data::loader   → RawTable
//!        │
//!        ▼
//!   data::schema   → StartupDataset (typed, validated)
//!        │
//!        ▼
//!   metrics        → EnrichedDataset (ratios, flags, unicorn_score)
//!        │
//!        ▼
//!   data::filter   → view (stable subset of rows)
//!        │
//!        ▼
//!   summary / report (presentation queries)
//! ```
//!
//! The enriched dataset is immutable once built; reloading replaces the
//! whole value. Filtering is a pure function of the dataset and the two
//! controls (industry, minimum score).

pub mod data;
pub mod metrics;
pub mod report;
pub mod state;
pub mod summary;

pub use data::filter::{filter_view, filtered_indices, IndustryFilter, ViewFilter};
pub use data::model::{EnrichedDataset, EnrichedRecord, StartupDataset, StartupRecord};
pub use data::DataError;
pub use metrics::{enrich, ConfigError, ScoreWeights};
