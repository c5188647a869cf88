use crate::data::filter::{filtered_indices, IndustryFilter, ViewFilter};
use crate::data::model::{EnrichedDataset, EnrichedRecord};

// ---------------------------------------------------------------------------
// Dashboard session state
// ---------------------------------------------------------------------------

/// One presentation session: the immutable enriched dataset, the two filter
/// controls, and the cached view.
///
/// The dataset is only ever replaced as a whole value (`set_dataset`); a
/// reader can never observe a partially enriched table. Control changes
/// recompute `visible_indices` and nothing else.
#[derive(Default)]
pub struct DashboardState {
    /// Enriched dataset (None until a file is loaded).
    dataset: Option<EnrichedDataset>,

    /// Current filter-control values.
    pub filter: ViewFilter,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,
}

impl DashboardState {
    /// Ingest a freshly enriched dataset, reset controls, refilter.
    pub fn set_dataset(&mut self, dataset: EnrichedDataset) {
        self.filter = ViewFilter::default();
        self.visible_indices = filtered_indices(&dataset, &self.filter);
        self.dataset = Some(dataset);
    }

    pub fn dataset(&self) -> Option<&EnrichedDataset> {
        self.dataset.as_ref()
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filter);
        }
    }

    /// Set the industry selector and refilter.
    pub fn set_industry(&mut self, selection: &str) {
        self.filter.industry = IndustryFilter::parse(selection);
        self.refilter();
    }

    /// Set the minimum-score control and refilter. The control's domain is
    /// [0, 1]; values outside it are pinned.
    pub fn set_min_score(&mut self, min_score: f64) {
        self.filter.min_score = min_score.clamp(0.0, 1.0);
        self.refilter();
    }

    /// Records passing the current filters, in table order.
    pub fn visible(&self) -> impl Iterator<Item = &EnrichedRecord> {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.dataset.as_ref().map(|ds| &ds.records[i]))
    }
}
