use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use startup_insights::data::filter::DEFAULT_MIN_SCORE;
use startup_insights::data::loader::load_file;
use startup_insights::data::schema::build_dataset;
use startup_insights::metrics::{enrich, ScoreWeights};
use startup_insights::report::{build_report, write_report, ReportFormat};
use startup_insights::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Startup ecosystem analytics over a tabular dataset.
///
/// Loads the dataset, scores every startup, and prints the dashboard
/// sections for the chosen filter state.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Dataset to load (.csv, .json or .parquet)
    data: PathBuf,

    /// Industry to filter on ("All" disables the filter)
    #[arg(long, default_value = "All")]
    industry: String,

    /// Minimum unicorn score (inclusive), in [0, 1]
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    min_score: f64,

    /// Number of startups in the top table
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file overriding the default scoring weights
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the industries present in the dataset and exit
    #[arg(long)]
    list_industries: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let weights = match &cli.weights {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading weights file {}", path.display()))?;
            serde_json::from_str::<ScoreWeights>(&text)
                .with_context(|| format!("parsing weights file {}", path.display()))?
        }
        None => ScoreWeights::default(),
    };

    let table =
        load_file(&cli.data).with_context(|| format!("loading {}", cli.data.display()))?;
    let dataset = build_dataset(&table)?;
    let enriched = enrich(&dataset, &weights)?;

    if cli.list_industries {
        for industry in enriched.industry_list() {
            println!("{industry}");
        }
        return Ok(());
    }

    if cli.industry != "All" && !enriched.industries.contains(&cli.industry) {
        log::warn!(
            "industry '{}' does not occur in the dataset; the view will be empty",
            cli.industry
        );
    }
    if !(0.0..=1.0).contains(&cli.min_score) {
        log::warn!("--min-score {} outside [0, 1], clamping", cli.min_score);
    }

    let mut state = DashboardState::default();
    state.set_dataset(enriched);
    state.set_industry(&cli.industry);
    state.set_min_score(cli.min_score);

    let dataset = state.dataset().context("dataset not loaded")?;
    let report = build_report(dataset, &state.filter, cli.top);

    match &cli.out {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            write_report(&report, cli.format.into(), &mut file)?;
            log::info!("report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_report(&report, cli.format.into(), &mut stdout.lock())?;
        }
    }

    Ok(())
}
