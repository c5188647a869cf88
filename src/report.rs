//! Dashboard report: the summary sections for one filter state, rendered
//! as plain text or JSON.

use std::io::{self, Write};

use serde::Serialize;

use crate::data::filter::{filtered_indices, IndustryFilter, ViewFilter};
use crate::data::model::{EnrichedDataset, FeatureStats};
use crate::metrics::FEATURE_NAMES;
use crate::summary::{
    self, IndustryCount, IndustryEfficiency, LinearFit, Overview, RoundsProfitability,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// The filter controls the report was built under, plus how many rows
/// matched.
#[derive(Debug, Clone, Serialize)]
pub struct ViewInfo {
    pub industry: String,
    pub min_score: f64,
    pub matched: usize,
}

/// One row of the top-startups table.
#[derive(Debug, Clone, Serialize)]
pub struct TopEntry {
    pub rank: usize,
    pub name: String,
    pub industry: String,
    pub unicorn_score: f64,
    pub valuation_musd: f64,
    pub funding_musd: f64,
    /// 0/1 as in the source data.
    pub is_unicorn: u8,
}

/// The min/max one score feature was rescaled with.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRange {
    pub feature: &'static str,
    #[serde(flatten)]
    pub stats: FeatureStats,
}

/// Everything the dashboard shows for one filter state.
///
/// Distribution sections (unicorns per industry, capital efficiency,
/// profitability by rounds) read the full dataset; the top table and the
/// funding/valuation fit follow the current view.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub overview: Overview,
    pub view: ViewInfo,
    pub top_startups: Vec<TopEntry>,
    pub unicorns_by_industry: Vec<IndustryCount>,
    pub funding_valuation_fit: Option<LinearFit>,
    pub industry_efficiency: Vec<IndustryEfficiency>,
    pub profitability_by_rounds: Vec<RoundsProfitability>,
    /// Normalization ranges behind the unicorn score, for provenance.
    pub score_features: Vec<FeatureRange>,
}

/// Assemble all report sections for the given filter state.
pub fn build_report(
    dataset: &EnrichedDataset,
    filter: &ViewFilter,
    top_n: usize,
) -> DashboardReport {
    let view_indices = filtered_indices(dataset, filter);

    let top_startups = summary::rank_by_score(dataset, &view_indices, top_n)
        .into_iter()
        .enumerate()
        .map(|(rank, i)| {
            let rec = &dataset.records[i];
            TopEntry {
                rank: rank + 1,
                name: rec.record.name.clone(),
                industry: rec.record.industry.clone(),
                unicorn_score: rec.unicorn_score,
                valuation_musd: rec.record.valuation_musd,
                funding_musd: rec.record.funding_musd,
                is_unicorn: rec.is_unicorn as u8,
            }
        })
        .collect();

    DashboardReport {
        overview: summary::overview(dataset),
        view: ViewInfo {
            industry: match &filter.industry {
                IndustryFilter::All => "All".to_string(),
                IndustryFilter::Only(name) => name.clone(),
            },
            min_score: filter.min_score,
            matched: view_indices.len(),
        },
        top_startups,
        unicorns_by_industry: summary::unicorns_by_industry(dataset),
        funding_valuation_fit: summary::funding_valuation_fit(dataset, &view_indices),
        industry_efficiency: summary::industry_efficiency(dataset),
        profitability_by_rounds: summary::profitability_by_rounds(dataset),
        score_features: FEATURE_NAMES
            .into_iter()
            .zip(dataset.feature_stats)
            .map(|(feature, stats)| FeatureRange { feature, stats })
            .collect(),
    }
}

/// Render in the requested format.
pub fn write_report(
    report: &DashboardReport,
    format: ReportFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => render_text(report, out),
        ReportFormat::Json => render_json(report, out),
    }
}

fn render_json(report: &DashboardReport, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::from)?;
    writeln!(out)
}

fn render_text(report: &DashboardReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "== ECOSYSTEM OVERVIEW ==")?;
    writeln!(out, "Total startups:      {}", report.overview.total_startups)?;
    writeln!(out, "Unicorns (>= $1B):   {}", report.overview.unicorns)?;
    writeln!(
        out,
        "Avg. unicorn score:  {:.3}",
        report.overview.mean_unicorn_score
    )?;
    writeln!(
        out,
        "View: industry={}, min score {:.2} -> {} rows",
        report.view.industry, report.view.min_score, report.view.matched
    )?;

    writeln!(out)?;
    writeln!(out, "== TOP PREDICTED UNICORNS ==")?;
    if report.top_startups.is_empty() {
        writeln!(out, "(no rows match the current filters)")?;
    } else {
        writeln!(
            out,
            "{:>3}  {:<24} {:<16} {:>6} {:>12} {:>10}",
            "#", "NAME", "INDUSTRY", "SCORE", "VALUATION", "FUNDING"
        )?;
        for entry in &report.top_startups {
            writeln!(
                out,
                "{:>3}  {:<24} {:<16} {:>6.3} {:>11.1}M {:>9.1}M",
                entry.rank,
                entry.name,
                entry.industry,
                entry.unicorn_score,
                entry.valuation_musd,
                entry.funding_musd
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "== UNICORNS BY INDUSTRY ==")?;
    if report.unicorns_by_industry.is_empty() {
        writeln!(out, "(no unicorns in the dataset)")?;
    }
    for count in &report.unicorns_by_industry {
        writeln!(out, "{:<20} {}", count.industry, count.unicorns)?;
    }

    writeln!(out)?;
    writeln!(out, "== FUNDING VS VALUATION ==")?;
    match &report.funding_valuation_fit {
        Some(fit) => writeln!(
            out,
            "valuation ~ {:.3} * funding + {:.1} (r={:.3}, n={})",
            fit.slope, fit.intercept, fit.r, fit.n
        )?,
        None => writeln!(out, "(not enough funding variation in the current view)")?,
    }

    writeln!(out)?;
    writeln!(out, "== INDUSTRY CAPITAL EFFICIENCY ==")?;
    for eff in &report.industry_efficiency {
        writeln!(
            out,
            "{:<20} {:>8.2}  ({} startups)",
            eff.industry, eff.mean_valuation_to_funding, eff.startups
        )?;
    }

    writeln!(out)?;
    writeln!(out, "== PROFITABILITY BY FUNDING ROUNDS ==")?;
    for row in &report.profitability_by_rounds {
        write!(out, "rounds {:>2}: ", row.funding_rounds)?;
        match &row.profitable {
            Some(f) => write!(
                out,
                "profitable n={} median={:.1}M [{:.1}..{:.1}]  ",
                f.count, f.median, f.min, f.max
            )?,
            None => write!(out, "profitable n=0  ")?,
        }
        match &row.unprofitable {
            Some(f) => writeln!(
                out,
                "unprofitable n={} median={:.1}M [{:.1}..{:.1}]",
                f.count, f.median, f.min, f.max
            )?,
            None => writeln!(out, "unprofitable n=0")?,
        }
    }

    writeln!(out)?;
    writeln!(out, "== SCORE FEATURES ==")?;
    for range in &report.score_features {
        writeln!(
            out,
            "{:<24} min={:<12.3} max={:.3}",
            range.feature, range.stats.min, range.stats.max
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FieldValue, RawTable};
    use crate::data::schema::build_dataset;
    use crate::metrics::{enrich, ScoreWeights};
    use std::collections::BTreeMap;

    fn enriched_fixture() -> EnrichedDataset {
        let headers = [
            "startup_name",
            "industry",
            "revenue_(m_usd)",
            "funding_amount_(m_usd)",
            "valuation_(m_usd)",
            "employees",
            "profitable",
            "market_share_(%)",
            "funding_rounds",
        ];
        let rows = [
            ("NeuraCore", "AI", 20.0, 50.0, 1200.0, 10.0, 1.0, 5.0, 3),
            ("PayShift", "FinTech", 8.0, 120.0, 400.0, 220.0, 0.0, 2.0, 2),
            ("GeneLoop", "HealthTech", 1.0, 15.0, 90.0, 40.0, 0.0, 0.4, 1),
        ];
        let raw_rows = rows
            .iter()
            .map(|(name, industry, rev, fund, val, emp, prof, share, rounds)| {
                let cells = [
                    FieldValue::String(name.to_string()),
                    FieldValue::String(industry.to_string()),
                    FieldValue::Float(*rev),
                    FieldValue::Float(*fund),
                    FieldValue::Float(*val),
                    FieldValue::Float(*emp),
                    FieldValue::Float(*prof),
                    FieldValue::Float(*share),
                    FieldValue::Integer(*rounds),
                ];
                headers
                    .iter()
                    .map(|h| h.to_string())
                    .zip(cells)
                    .collect::<BTreeMap<_, _>>()
            })
            .collect();
        let table = RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: raw_rows,
        };
        enrich(&build_dataset(&table).unwrap(), &ScoreWeights::default()).unwrap()
    }

    #[test]
    fn report_reflects_the_filter_state() {
        let ds = enriched_fixture();
        let filter = ViewFilter {
            industry: IndustryFilter::parse("AI"),
            min_score: 0.0,
        };
        let report = build_report(&ds, &filter, 10);
        assert_eq!(report.view.industry, "AI");
        assert_eq!(report.view.matched, 1);
        assert_eq!(report.top_startups.len(), 1);
        assert_eq!(report.top_startups[0].name, "NeuraCore");
        assert_eq!(report.top_startups[0].rank, 1);
        assert_eq!(report.top_startups[0].is_unicorn, 1);
        // Distribution sections still cover the full dataset.
        assert_eq!(report.overview.total_startups, 3);
        assert_eq!(report.industry_efficiency.len(), 3);
    }

    #[test]
    fn text_rendering_has_all_sections() {
        let ds = enriched_fixture();
        let report = build_report(&ds, &ViewFilter::default(), 5);
        let mut buf = Vec::new();
        write_report(&report, ReportFormat::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for section in [
            "== ECOSYSTEM OVERVIEW ==",
            "== TOP PREDICTED UNICORNS ==",
            "== UNICORNS BY INDUSTRY ==",
            "== FUNDING VS VALUATION ==",
            "== INDUSTRY CAPITAL EFFICIENCY ==",
            "== PROFITABILITY BY FUNDING ROUNDS ==",
            "== SCORE FEATURES ==",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
    }

    #[test]
    fn json_rendering_is_valid_and_typed() {
        let ds = enriched_fixture();
        let report = build_report(&ds, &ViewFilter::default(), 5);
        let mut buf = Vec::new();
        write_report(&report, ReportFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["overview"]["total_startups"], 3);
        assert!(value["top_startups"].is_array());
        assert_eq!(value["view"]["min_score"], 0.5);
        assert_eq!(value["score_features"].as_array().unwrap().len(), 5);
        assert_eq!(value["score_features"][0]["feature"], "valuation_(m_usd)");
    }

    #[test]
    fn empty_view_renders_without_rows() {
        let ds = enriched_fixture();
        let filter = ViewFilter {
            industry: IndustryFilter::parse("SpaceTech"),
            min_score: 0.99,
        };
        let report = build_report(&ds, &filter, 5);
        assert_eq!(report.view.matched, 0);
        let mut buf = Vec::new();
        write_report(&report, ReportFormat::Text, &mut buf).unwrap();
        assert!(String::from_utf8(buf)
            .unwrap()
            .contains("no rows match the current filters"));
    }
}
