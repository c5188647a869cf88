//! End-to-end: CSV text with real-world messy headers, through loading,
//! schema validation, enrichment, filtering, and report rendering.

use startup_insights::data::filter::{filter_view, IndustryFilter, ViewFilter};
use startup_insights::data::loader::read_csv;
use startup_insights::data::schema::build_dataset;
use startup_insights::metrics::{enrich, ScoreWeights};
use startup_insights::report::{build_report, write_report, ReportFormat};
use startup_insights::DataError;

const CSV: &str = "\
Startup Name,Industry,Revenue (M USD),Funding Amount (M USD),Valuation (M USD),Employees,Profitable,Market Share (%),Funding Rounds
NeuraCore,AI,20,50,1200,10,1,5,3
PayShift,FinTech,8,120,400,220,0,2,2
SeedLing,AgriTech,1,0,5,500,0,0.1,1
GeneLoop,HealthTech,30,60,2400,80,1,7,4
";

fn enriched() -> startup_insights::EnrichedDataset {
    let table = read_csv(CSV.as_bytes()).unwrap();
    let dataset = build_dataset(&table).unwrap();
    enrich(&dataset, &ScoreWeights::default()).unwrap()
}

#[test]
fn end_to_end_scoring_preserves_rows_and_bounds() {
    let ds = enriched();
    assert_eq!(ds.len(), 4);

    let names: Vec<&str> = ds.records.iter().map(|r| r.record.name.as_str()).collect();
    assert_eq!(names, ["NeuraCore", "PayShift", "SeedLing", "GeneLoop"]);

    for rec in &ds.records {
        assert!(rec.unicorn_score >= 0.0 && rec.unicorn_score <= 1.0 + 1e-12);
        assert!(rec.revenue_to_funding.is_finite());
        assert!(rec.valuation_per_employee.is_finite());
        assert!(rec.valuation_to_funding.is_finite());
    }

    // Zero-funding row: both funding ratios coerced to 0.
    let seedling = &ds.records[2];
    assert_eq!(seedling.revenue_to_funding, 0.0);
    assert_eq!(seedling.valuation_to_funding, 0.0);

    let unicorns: Vec<&str> = ds
        .records
        .iter()
        .filter(|r| r.is_unicorn)
        .map(|r| r.record.name.as_str())
        .collect();
    assert_eq!(unicorns, ["NeuraCore", "GeneLoop"]);
}

#[test]
fn filters_are_stable_and_exact() {
    let ds = enriched();

    let everything = filter_view(
        &ds,
        &ViewFilter {
            industry: IndustryFilter::All,
            min_score: 0.0,
        },
    );
    let names: Vec<&str> = everything.iter().map(|r| r.record.name.as_str()).collect();
    assert_eq!(names, ["NeuraCore", "PayShift", "SeedLing", "GeneLoop"]);

    let fintech = filter_view(
        &ds,
        &ViewFilter {
            industry: IndustryFilter::parse("FinTech"),
            min_score: 0.0,
        },
    );
    assert_eq!(fintech.len(), 1);
    assert_eq!(fintech[0].record.name, "PayShift");

    // A high threshold may legitimately produce an empty view.
    let strict = filter_view(
        &ds,
        &ViewFilter {
            industry: IndustryFilter::parse("FinTech"),
            min_score: 0.9,
        },
    );
    for rec in &strict {
        assert_eq!(rec.record.industry, "FinTech");
        assert!(rec.unicorn_score >= 0.9);
    }
}

#[test]
fn report_renders_from_csv_input() {
    let ds = enriched();
    let report = build_report(&ds, &ViewFilter::default(), 3);
    assert_eq!(report.overview.total_startups, 4);
    assert_eq!(report.overview.unicorns, 2);

    let mut buf = Vec::new();
    write_report(&report, ReportFormat::Json, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["overview"]["unicorns"], 2);
    assert!(value["industry_efficiency"].as_array().unwrap().len() >= 3);
}

#[test]
fn dropping_a_required_column_is_a_schema_error() {
    let csv_without_employees: String = CSV
        .lines()
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            let kept: Vec<&str> = cols
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != 5)
                .map(|(_, c)| *c)
                .collect();
            kept.join(",")
        })
        .collect::<Vec<String>>()
        .join("\n");

    let table = read_csv(csv_without_employees.as_bytes()).unwrap();
    match build_dataset(&table) {
        Err(DataError::MissingColumn { column }) => assert_eq!(column, "employees"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    let first = enriched();
    let second = enriched();
    for (a, b) in first.records.iter().zip(&second.records) {
        assert_eq!(a.unicorn_score.to_bits(), b.unicorn_score.to_bits());
    }
}
