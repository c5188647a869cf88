use crate::data::model::{
    EnrichedDataset, EnrichedRecord, FeatureStats, StartupDataset, StartupRecord,
};
use crate::metrics::normalize::{column_stats, finite_or_zero, min_max};
use crate::metrics::weights::{ConfigError, ScoreWeights};

pub const FEATURE_COUNT: usize = 5;

/// Feature-matrix columns, in the fixed order the weights apply to.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "valuation_(m_usd)",
    "revenue_to_funding",
    "profitable",
    "market_share_(%)",
    "valuation_per_employee",
];

/// Valuation threshold for the unicorn flag, in millions of USD.
pub const UNICORN_VALUATION_MUSD: f64 = 1000.0;

/// x/0 and 0/0 are "no signal": the ratio columns never carry inf or NaN.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    finite_or_zero(numerator / denominator)
}

/// Run the metrics pipeline: derived columns, feature normalization, and
/// the weighted unicorn score.
///
/// Deterministic; the output has the same row count and order as the
/// input, and every derived field is finite. Normalization min/max are
/// taken over the whole dataset exactly once — filtering downstream never
/// changes any score. An empty dataset enriches to an empty dataset.
pub fn enrich(
    dataset: &StartupDataset,
    weights: &ScoreWeights,
) -> Result<EnrichedDataset, ConfigError> {
    weights.validate()?;

    // Derived ratio columns, already coerced finite.
    let features: Vec<[f64; FEATURE_COUNT]> = dataset.records.iter().map(feature_row).collect();

    // Min/max per feature column over the full dataset.
    let feature_stats: [FeatureStats; FEATURE_COUNT] =
        std::array::from_fn(|col| column_stats(features.iter().map(|row| row[col])));

    let weight_row = weights.as_array();
    let records = dataset
        .records
        .iter()
        .zip(&features)
        .map(|(record, feats)| {
            let unicorn_score = feats
                .iter()
                .zip(feature_stats)
                .zip(weight_row)
                .map(|((&value, stats), weight)| weight * min_max(value, stats))
                .sum::<f64>();

            EnrichedRecord {
                record: record.clone(),
                revenue_to_funding: safe_ratio(record.revenue_musd, record.funding_musd),
                valuation_per_employee: safe_ratio(record.valuation_musd, record.employees),
                valuation_to_funding: safe_ratio(record.valuation_musd, record.funding_musd),
                is_unicorn: record.valuation_musd >= UNICORN_VALUATION_MUSD,
                unicorn_score,
            }
        })
        .collect();

    Ok(EnrichedDataset {
        records,
        industries: dataset.industries.clone(),
        feature_stats,
    })
}

/// One row of the feature matrix, in [`FEATURE_NAMES`] order, with every
/// undefined value (from empty cells or division by zero) coerced to 0.
fn feature_row(record: &StartupRecord) -> [f64; FEATURE_COUNT] {
    [
        finite_or_zero(record.valuation_musd),
        safe_ratio(record.revenue_musd, record.funding_musd),
        finite_or_zero(record.profitable),
        finite_or_zero(record.market_share_pct),
        safe_ratio(record.valuation_musd, record.employees),
    ]
}
