//! The metrics pipeline: derived columns and the composite unicorn score.
//!
//! ```text
//!   StartupDataset
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  enrich   │  ratios, unicorn flag, feature matrix
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  coerce ±inf/NaN → 0, min-max per feature column
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  weights  │  validated weighted sum → unicorn_score ∈ [0, 1]
//!   └──────────┘
//! ```
//!
//! Runs once per dataset load; the output is immutable. Normalization is
//! computed over the full dataset, never over a filtered subset.

pub mod enrich;
pub mod normalize;
pub mod weights;

pub use enrich::{enrich, FEATURE_COUNT, FEATURE_NAMES, UNICORN_VALUATION_MUSD};
pub use weights::{ConfigError, ScoreWeights};
