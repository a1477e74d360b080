//! Schema Benchmark CLI
//!
//! # Usage
//!
//! ```bash
//! # Run the built-in suite and save a baseline
//! cargo run --bin bench-schema --release -- --save target/bench/baseline.json
//!
//! # Compare against it, failing CI on a significant slowdown
//! cargo run --bin bench-schema --release -- -c target/bench/baseline.json -t 5 --fail-on-regression
//!
//! # Benchmark 1.x behavior with a quick preset
//! cargo run --bin bench-schema --release -- --joi 1.4.0 --preset fast
//! ```

use chrono::Utc;
use clap::Parser;
use schema_bench::benchmark::report::{JsonReporter, MarkdownReporter, ReportMeta, TerminalReporter};
use schema_bench::benchmark::{
    compare, regressions, rows_without_baseline, BenchmarkOptions, SampledTrialRunner,
    SuiteDriver, TrialOptions,
};
use schema_bench::config::Preset;
use schema_bench::schema::Library;
use schema_bench::suites;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bench-schema")]
#[command(about = "Schema Benchmark - ops/sec trials with regression comparison", long_about = None)]
struct Cli {
    /// Previous JSON report to compare against
    #[arg(short, long)]
    compare: Option<PathBuf>,

    /// Save this run's JSON report
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Significance threshold in percent (default: 10)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Library build to benchmark ("." for the compiled-in build)
    #[arg(short, long, default_value = ".")]
    joi: String,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling preset: fast, balanced, thorough
    #[arg(long)]
    preset: Option<String>,

    /// Only run test cases whose name contains this substring
    #[arg(short, long)]
    filter: Option<String>,

    /// Also write a Markdown report
    #[arg(short, long)]
    markdown: Option<PathBuf>,

    /// Exit non-zero when any trial is significantly slower
    #[arg(long)]
    fail_on_regression: bool,

    /// Print trial names after the validation guard and exit
    #[arg(long)]
    list: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = load_options(&cli)?;
    debug!("Options: {:?}", options);

    let library = Library::load(&cli.joi)?;
    info!("Library build {}", library.version());

    // Read before timing so a bad path is reported up front
    let previous = cli.compare.as_ref().and_then(JsonReporter::load_previous);

    let runner = SampledTrialRunner::new(options.trial.clone());
    let mut driver = SuiteDriver::new(&library, runner).with_filter(options.filter.clone());
    driver.register_all(suites::builtin());

    if cli.list {
        for name in driver.trial_names()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let report = driver.run()?;

    let rows = match &previous {
        Some(previous) => compare(&report, previous, options.threshold_pct),
        None => rows_without_baseline(&report),
    };

    println!();
    TerminalReporter::print(&rows);

    if let Some(path) = &cli.save {
        JsonReporter::save(&report, path)?;
        println!("\n📄 JSON saved: {}", path.display());
    }

    if let Some(path) = &cli.markdown {
        let meta = ReportMeta {
            library_version: library.version().to_string(),
            threshold_pct: options.threshold_pct,
            generated_at: Utc::now(),
        };
        MarkdownReporter::save(&rows, &meta, path)?;
        println!("📄 Markdown saved: {}", path.display());
    }

    let slower: Vec<_> = regressions(&rows).collect();
    if cli.fail_on_regression && !slower.is_empty() {
        eprintln!("\n❌ Performance regression detected!");
        for row in slower {
            eprintln!("   {}", row.result.name);
        }
        std::process::exit(1);
    }

    println!("\n✅ Benchmark complete!");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// File values first, then command-line overrides
fn load_options(cli: &Cli) -> Result<BenchmarkOptions, Box<dyn std::error::Error>> {
    let mut options = match &cli.config {
        Some(path) => BenchmarkOptions::from_yaml(path)?,
        None => BenchmarkOptions::new(),
    };

    if let Some(preset) = &cli.preset {
        let preset: Preset = preset.parse()?;
        options = options.trial(TrialOptions::preset(preset));
    }
    if let Some(threshold) = cli.threshold {
        options = options.threshold_pct(threshold);
    }
    if let Some(filter) = &cli.filter {
        options = options.filter(filter.clone());
    }

    options.validate()?;
    Ok(options)
}
