use super::model::{EnrichedDataset, EnrichedRecord};

// ---------------------------------------------------------------------------
// Filter controls: industry selector + minimum-score slider
// ---------------------------------------------------------------------------

/// Inclusive lower bound the score control starts at.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Sentinel used by the industry selector control for "no filtering".
pub const ALL_INDUSTRIES: &str = "All";

/// The industry selector: either the `All` sentinel or one exact value.
/// Matching is case-sensitive, no fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndustryFilter {
    All,
    Only(String),
}

impl IndustryFilter {
    /// Interpret a selector-control string, mapping the sentinel to `All`.
    pub fn parse(selection: &str) -> Self {
        if selection == ALL_INDUSTRIES {
            IndustryFilter::All
        } else {
            IndustryFilter::Only(selection.to_string())
        }
    }

    pub fn matches(&self, industry: &str) -> bool {
        match self {
            IndustryFilter::All => true,
            IndustryFilter::Only(only) => only == industry,
        }
    }
}

/// The two user-facing filter controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFilter {
    pub industry: IndustryFilter,
    /// Inclusive lower bound on `unicorn_score`, in [0, 1].
    pub min_score: f64,
}

impl Default for ViewFilter {
    fn default() -> Self {
        ViewFilter {
            industry: IndustryFilter::All,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering – pure functions of (dataset, controls)
// ---------------------------------------------------------------------------

/// Return indices of records that pass both filter controls, in dataset
/// order (stable; callers sort separately for display).
pub fn filtered_indices(dataset: &EnrichedDataset, filter: &ViewFilter) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.industry.matches(&r.record.industry))
        .filter(|(_, r)| r.unicorn_score >= filter.min_score)
        .map(|(i, _)| i)
        .collect()
}

/// Borrowing variant of [`filtered_indices`] for callers that want the rows
/// themselves.
pub fn filter_view<'a>(
    dataset: &'a EnrichedDataset,
    filter: &ViewFilter,
) -> Vec<&'a EnrichedRecord> {
    filtered_indices(dataset, filter)
        .into_iter()
        .map(|i| &dataset.records[i])
        .collect()
}
