//! Read-only presentation queries over the enriched dataset.
//!
//! Everything here is derived data for display: nothing mutates the
//! dataset, and none of it feeds back into scoring. Queries that take a
//! slice of indices operate on the current view; the rest read the full
//! table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::EnrichedDataset;

// ---------------------------------------------------------------------------
// Ecosystem overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_startups: usize,
    pub unicorns: usize,
    pub mean_unicorn_score: f64,
}

/// Headline numbers over the full (unfiltered) dataset.
pub fn overview(dataset: &EnrichedDataset) -> Overview {
    let unicorns = dataset.records.iter().filter(|r| r.is_unicorn).count();
    let mean_unicorn_score = if dataset.is_empty() {
        0.0
    } else {
        dataset.records.iter().map(|r| r.unicorn_score).sum::<f64>() / dataset.len() as f64
    };
    Overview {
        total_startups: dataset.len(),
        unicorns,
        mean_unicorn_score,
    }
}

// ---------------------------------------------------------------------------
// Top-N by unicorn score
// ---------------------------------------------------------------------------

/// Indices of the `n` highest-scoring records, descending. The sort is
/// stable, so ties keep their table order.
pub fn top_by_score(dataset: &EnrichedDataset, n: usize) -> Vec<usize> {
    let all: Vec<usize> = (0..dataset.len()).collect();
    rank_by_score(dataset, &all, n)
}

/// Like [`top_by_score`], but restricted to the given view indices.
pub fn rank_by_score(dataset: &EnrichedDataset, indices: &[usize], n: usize) -> Vec<usize> {
    let mut ranked = indices.to_vec();
    ranked.sort_by(|&a, &b| {
        dataset.records[b]
            .unicorn_score
            .total_cmp(&dataset.records[a].unicorn_score)
    });
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Unicorn distribution by industry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct IndustryCount {
    pub industry: String,
    pub unicorns: usize,
}

/// Unicorn counts per industry, most unicorns first (name breaks ties).
/// Industries without unicorns are omitted.
pub fn unicorns_by_industry(dataset: &EnrichedDataset) -> Vec<IndustryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in dataset.records.iter().filter(|r| r.is_unicorn) {
        *counts.entry(rec.record.industry.as_str()).or_default() += 1;
    }
    let mut out: Vec<IndustryCount> = counts
        .into_iter()
        .map(|(industry, unicorns)| IndustryCount {
            industry: industry.to_string(),
            unicorns,
        })
        .collect();
    out.sort_by(|a, b| b.unicorns.cmp(&a.unicorns).then(a.industry.cmp(&b.industry)));
    out
}

// ---------------------------------------------------------------------------
// Funding vs valuation least-squares fit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r: f64,
    /// Points actually used (finite funding and valuation).
    pub n: usize,
}

/// Least-squares fit of valuation against funding over the given view.
///
/// Rows with a non-finite funding or valuation cell are skipped. Returns
/// `None` when fewer than two usable points remain or funding has zero
/// variance — never NaN.
pub fn funding_valuation_fit(dataset: &EnrichedDataset, indices: &[usize]) -> Option<LinearFit> {
    let points: Vec<(f64, f64)> = indices
        .iter()
        .map(|&i| {
            let r = &dataset.records[i].record;
            (r.funding_musd, r.valuation_musd)
        })
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let n = points.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (x, y) in &points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    if ss_xx == 0.0 {
        return None;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;
    // Constant valuation: the fit is flat and correlation carries no signal.
    let r = if ss_yy == 0.0 {
        0.0
    } else {
        ss_xy / (ss_xx.sqrt() * ss_yy.sqrt())
    };

    Some(LinearFit {
        slope,
        intercept,
        r,
        n,
    })
}

// ---------------------------------------------------------------------------
// Capital efficiency by industry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct IndustryEfficiency {
    pub industry: String,
    /// Mean valuation-to-funding ratio across the industry's startups.
    pub mean_valuation_to_funding: f64,
    pub startups: usize,
}

/// Mean valuation-to-funding ratio per industry, most efficient first.
pub fn industry_efficiency(dataset: &EnrichedDataset) -> Vec<IndustryEfficiency> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in &dataset.records {
        let entry = groups.entry(rec.record.industry.as_str()).or_insert((0.0, 0));
        entry.0 += rec.valuation_to_funding;
        entry.1 += 1;
    }
    let mut out: Vec<IndustryEfficiency> = groups
        .into_iter()
        .map(|(industry, (sum, count))| IndustryEfficiency {
            industry: industry.to_string(),
            mean_valuation_to_funding: sum / count as f64,
            startups: count,
        })
        .collect();
    out.sort_by(|a, b| {
        b.mean_valuation_to_funding
            .total_cmp(&a.mean_valuation_to_funding)
            .then(a.industry.cmp(&b.industry))
    });
    out
}

// ---------------------------------------------------------------------------
// Funding distribution by rounds, split by profitability
// ---------------------------------------------------------------------------

/// Five-number summary (box-plot statistics) of one group of values.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundsProfitability {
    pub funding_rounds: i64,
    pub profitable: Option<FiveNumber>,
    pub unprofitable: Option<FiveNumber>,
}

/// Funding-amount distributions per funding-round count, split by whether
/// the startup is profitable. Ascending by round count; non-finite funding
/// cells are skipped.
pub fn profitability_by_rounds(dataset: &EnrichedDataset) -> Vec<RoundsProfitability> {
    let mut groups: BTreeMap<i64, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for rec in &dataset.records {
        if !rec.record.funding_musd.is_finite() {
            continue;
        }
        let entry = groups.entry(rec.record.funding_rounds).or_default();
        if rec.record.profitable > 0.0 {
            entry.0.push(rec.record.funding_musd);
        } else {
            entry.1.push(rec.record.funding_musd);
        }
    }
    groups
        .into_iter()
        .map(|(funding_rounds, (mut profitable, mut unprofitable))| RoundsProfitability {
            funding_rounds,
            profitable: five_number(&mut profitable),
            unprofitable: five_number(&mut unprofitable),
        })
        .collect()
}

/// Sorts in place. Quantiles use linear interpolation between order
/// statistics (the plotting convention). `None` for an empty group.
fn five_number(values: &mut [f64]) -> Option<FiveNumber> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(FiveNumber {
        min: values[0],
        q1: quantile(values, 0.25),
        median: quantile(values, 0.5),
        q3: quantile(values, 0.75),
        max: values[values.len() - 1],
        count: values.len(),
    })
}

/// Linear-interpolated quantile of sorted values, p in [0, 1].
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
