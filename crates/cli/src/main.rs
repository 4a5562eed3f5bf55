//! # checklast-cli
//!
//! Command-line interface for last-period anomaly checks.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use checklast_facade::{
    AnomalyTracker, BackCount, Column, ExportSink, FileSink, ModelSpecification, SmoothingChecker,
    SortKey, Thresholds, TrackerConfig, TsCollection,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "checklast")]
#[command(about = "Last-period anomaly checks on time series", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the last periods of every series and export the result table
    Check {
        #[command(flatten)]
        tracker: TrackerArgs,

        /// Sort column (name, period, abs1..abs3, rel1..rel3)
        #[arg(long, value_parser = parse_column)]
        sort: Option<Column>,

        /// Sort in descending order
        #[arg(long, requires = "sort")]
        descending: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tab separated output instead of comma separated
        #[arg(long)]
        tab: bool,
    },

    /// Print the report parameters of a run as JSON
    Report {
        #[command(flatten)]
        tracker: TrackerArgs,
    },

    /// Print the default configuration as JSON
    Config,
}

#[derive(Args)]
struct TrackerArgs {
    /// Input CSV grid: a period column followed by one column per series
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of last periods checked (1, 2 or 3)
    #[arg(short, long)]
    back_count: Option<u8>,

    /// Modelling specification (TR0..TR5, TRfull)
    #[arg(short, long)]
    spec: Option<ModelSpecification>,

    /// Relative error from which a cell is a warning
    #[arg(long)]
    orange: Option<f64>,

    /// Relative error from which a cell is critical
    #[arg(long)]
    red: Option<f64>,
}

impl TrackerArgs {
    /// File configuration, then command-line overrides.
    fn config(&self) -> CliResult<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::from_file(path).map_err(|e| e.to_string())?,
            None => TrackerConfig::default(),
        };
        if let Some(count) = self.back_count {
            config.back_count = BackCount::new(count).map_err(|e| e.to_string())?;
        }
        if let Some(spec) = self.spec {
            config.specification = spec;
        }
        let orange = self.orange.unwrap_or(config.thresholds.orange);
        let red = self.red.unwrap_or(config.thresholds.red);
        config.thresholds = Thresholds::new(orange, red).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Tracker reconciled with the input series.
    fn tracker(&self) -> CliResult<AnomalyTracker> {
        let config = self.config()?;
        let collection = TsCollection::from_csv_path(&self.input).map_err(|e| e.to_string())?;
        let mut tracker =
            AnomalyTracker::new(config, Arc::new(SmoothingChecker)).map_err(|e| e.to_string())?;
        tracker.on_collection_change(&collection);
        Ok(tracker)
    }
}

/// Parse a sort column name such as `rel2`.
fn parse_column(value: &str) -> CliResult<Column> {
    let value = value.to_lowercase();
    match value.as_str() {
        "name" => return Ok(Column::SeriesName),
        "period" => return Ok(Column::LastPeriod),
        _ => {}
    }
    let (kind, period) = value.split_at(value.len().min(3));
    let period: usize = period
        .parse()
        .ok()
        .filter(|p| (1..=3).contains(p))
        .ok_or_else(|| format!("Unknown column: {}", value))?;
    match kind {
        "abs" => Ok(Column::AbsoluteError(period - 1)),
        "rel" => Ok(Column::RelativeError(period - 1)),
        _ => Err(format!("Unknown column: {}", value)),
    }
}

/// Writes the export to standard output.
struct StdoutSink {
    delimiter: u8,
}

impl ExportSink for StdoutSink {
    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn deliver(&mut self, content: &str) -> checklast_facade::Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| checklast_facade::CheckLastError::ExportFailure(e.to_string()))
    }
}

/// Run check command
fn run_check(
    args: TrackerArgs,
    sort: Option<Column>,
    descending: bool,
    output: Option<PathBuf>,
    tab: bool,
) -> CliResult<()> {
    let mut tracker = args.tracker()?;
    let processed = tracker.process_all();
    info!(
        series = tracker.len(),
        processed,
        spec = %tracker.specification(),
        "checks completed"
    );

    let delimiter = if tab { b'\t' } else { b',' };
    let mut sink: Box<dyn ExportSink> = match &output {
        Some(path) => Box::new(FileSink::new(path).with_delimiter(delimiter)),
        None => Box::new(StdoutSink { delimiter }),
    };
    let result = match sort {
        Some(column) => {
            let key = SortKey { column, descending };
            tracker.export_sorted_to(sink.as_mut(), key)
        }
        None => tracker.export_to(sink.as_mut()),
    };
    result.map_err(|e| e.to_string())?;

    if let Some(path) = output {
        eprintln!("Results written to {:?}", path);
    }
    Ok(())
}

/// Run report command
fn run_report(args: TrackerArgs) -> CliResult<()> {
    let tracker = args.tracker()?;
    let json = serde_json::to_string_pretty(&tracker.report_parameters().to_map())
        .map_err(|e| format!("Failed to write JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

/// Run config command
fn run_config() -> CliResult<()> {
    let json = TrackerConfig::default()
        .to_json_pretty()
        .map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checklast=info,checklast_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            tracker,
            sort,
            descending,
            output,
            tab,
        } => run_check(tracker, sort, descending, output, tab),

        Commands::Report { tracker } => run_report(tracker),

        Commands::Config => run_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
