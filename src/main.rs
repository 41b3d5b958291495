// logscope - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Batch acquisition (mock generator or JSON batch file)
// 4. One-shot or watch-mode report rendering and export

use clap::Parser;
use logscope::app::report;
use logscope::app::source::BatchSource;
use logscope::core::engine::{EngineOptions, LogAnalyticsEngine, SuccessPolicy};
use logscope::core::export;
use logscope::core::filter::{FilterCriteria, HourRange, SearchField, StatusClassFilter};
use logscope::core::mock::MockConfig;
use logscope::core::model::LogRecord;
use logscope::platform::config::{load_config, AppConfig, PlatformPaths};
use logscope::util::constants;
use logscope::util::error::{ConfigError, ExportError, LogScopeError};
use logscope::util::logging;

use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// logscope - API access log analytics.
///
/// Ingest a batch of access log records (a wire-format JSON file, or
/// generated mock data), then print summary metrics, the hourly
/// traffic profile, and a filtered record table.
#[derive(Parser, Debug)]
#[command(name = "logscope", version, about)]
struct Cli {
    /// JSON batch file of wire-named records (mock data if omitted).
    input: Option<PathBuf>,

    /// Number of mock records to generate.
    #[arg(short = 'n', long = "count")]
    count: Option<usize>,

    /// RNG seed for reproducible mock batches.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Hours of history mock timestamps span.
    #[arg(long = "span-hours")]
    span_hours: Option<u32>,

    /// Case-insensitive substring filter (endpoint, application, user, api).
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Exact HTTP method filter ("all" = no filtering).
    #[arg(short = 'm', long = "method")]
    method: Option<String>,

    /// Status class filter: all, success, or error.
    #[arg(long = "status", default_value = "all")]
    status: String,

    /// Inclusive hour-of-day window, e.g. 9-17.
    #[arg(long = "hours", value_name = "START-END")]
    hours: Option<String>,

    /// Print the 24-hour traffic histogram.
    #[arg(short = 'b', long = "buckets")]
    buckets: bool,

    /// Print the filtered record table (optionally with a row limit).
    #[arg(short = 't', long = "table", value_name = "ROWS", num_args = 0..=1)]
    table: Option<Option<usize>>,

    /// Export the filtered view to a .csv or .json file.
    #[arg(short = 'o', long = "export", value_name = "FILE")]
    export: Option<PathBuf>,

    /// Bucketing timezone as a UTC offset in minutes (e.g. 120 for UTC+2).
    #[arg(long = "utc-offset", value_name = "MINUTES")]
    utc_offset_minutes: Option<i16>,

    /// Re-derive success from the status code instead of trusting the
    /// record's own flag.
    #[arg(long = "derive-success")]
    derive_success: bool,

    /// Refresh with a fresh batch every SECS seconds (mock sources get
    /// new data; file sources are re-read).
    #[arg(short = 'w', long = "watch", value_name = "SECS")]
    watch: Option<u64>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging init so the configured level can
    // apply; load-time diagnostics surface as returned warnings instead.
    let platform_paths = PlatformPaths::resolve();
    let (config, config_warnings) = load_config(&platform_paths.config_dir);

    logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "logscope starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &AppConfig) -> Result<(), LogScopeError> {
    let options = build_engine_options(cli, config)?;
    let criteria = build_criteria(cli)?;
    let source = build_source(cli, config);

    let mut engine = LogAnalyticsEngine::with_options(options);

    match cli.watch {
        Some(secs) => {
            let interval = secs.clamp(
                constants::MIN_WATCH_INTERVAL_SECS,
                constants::MAX_WATCH_INTERVAL_SECS,
            );
            tracing::info!(interval_secs = interval, "Watch mode; Ctrl-C to stop");
            loop {
                refresh_and_report(&mut engine, &source, &criteria, cli)?;
                std::thread::sleep(Duration::from_secs(interval));
            }
        }
        None => refresh_and_report(&mut engine, &source, &criteria, cli),
    }
}

/// One poll-and-replace cycle: load a batch, ingest it wholesale, and
/// render the requested views.
fn refresh_and_report(
    engine: &mut LogAnalyticsEngine,
    source: &BatchSource,
    criteria: &FilterCriteria,
    cli: &Cli,
) -> Result<(), LogScopeError> {
    let batch = source.load(Utc::now())?;
    engine.ingest(batch);

    println!("logscope — {}", source.describe());
    println!();
    print!("{}", report::render_summary(&engine.summary()));

    if cli.buckets {
        println!();
        print!("{}", report::render_histogram(&engine.hourly_buckets()));
    }

    let view = engine.filter(criteria);
    if !criteria.is_empty() {
        println!();
        println!("Filtered: {} of {} records", view.len(), engine.len());
    }

    if let Some(rows) = cli.table {
        let rows = rows.unwrap_or(constants::DEFAULT_TABLE_ROWS);
        println!();
        print!("{}", report::render_table(&view, rows));
    }

    if let Some(ref path) = cli.export {
        let written = export_view(&view, path)?;
        tracing::info!(records = written, path = %path.display(), "Exported filtered view");
        println!();
        println!("Exported {written} records to {}", path.display());
    }

    Ok(())
}

/// Engine options from CLI flags layered over config.toml values.
fn build_engine_options(cli: &Cli, config: &AppConfig) -> Result<EngineOptions, LogScopeError> {
    let offset = cli
        .utc_offset_minutes
        .unwrap_or(config.utc_offset_minutes);
    let mut options = EngineOptions::default().with_utc_offset_minutes(offset)?;

    if cli.derive_success || config.derive_success {
        options = options.with_success_policy(SuccessPolicy::DeriveFromStatus);
    }

    if let Some(ref names) = config.search_fields {
        let mut fields = Vec::new();
        for name in names {
            match SearchField::parse(name) {
                Ok(field) => fields.push(field),
                Err(e) => tracing::warn!(error = %e, "Ignoring configured search field"),
            }
        }
        if !fields.is_empty() {
            options = options.with_search_fields(fields);
        }
    }

    Ok(options)
}

fn build_criteria(cli: &Cli) -> Result<FilterCriteria, LogScopeError> {
    let status_class = StatusClassFilter::parse(&cli.status).map_err(LogScopeError::Config)?;
    let hour_range = match cli.hours.as_deref() {
        Some(input) => Some(parse_hour_range(input).map_err(LogScopeError::Config)?),
        None => None,
    };

    Ok(FilterCriteria {
        search_text: cli.search.clone(),
        method: cli.method.clone(),
        status_class,
        hour_range,
    })
}

fn build_source(cli: &Cli, config: &AppConfig) -> BatchSource {
    match cli.input {
        Some(ref path) => BatchSource::JsonFile(path.clone()),
        None => BatchSource::Mock(MockConfig {
            count: cli.count.unwrap_or(config.mock_count),
            span_hours: cli.span_hours.unwrap_or(config.mock_span_hours),
            seed: cli.seed,
        }),
    }
}

/// Parse an inclusive "START-END" hour window.
fn parse_hour_range(input: &str) -> Result<HourRange, ConfigError> {
    let (start, end) = input
        .split_once('-')
        .ok_or_else(|| ConfigError::MalformedHourRange {
            input: input.to_string(),
        })?;

    let parse = |text: &str| {
        text.trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::MalformedHourRange {
                input: input.to_string(),
            })
    };
    let start = parse(start)?;
    let end = parse(end)?;

    for value in [start, end] {
        if value > 23 {
            return Err(ConfigError::InvalidHour { value });
        }
    }

    HourRange::new(start as u8, end as u8)
}

/// Export the filtered view, inferring the format from the extension.
fn export_view(view: &[&LogRecord], path: &Path) -> Result<usize, LogScopeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let file = File::create(path).map_err(|e| LogScopeError::Io {
        path: path.to_path_buf(),
        operation: "create",
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    let written = match extension.as_deref() {
        Some("csv") => export::export_csv(view, &mut writer, path)?,
        Some("json") => export::export_json(view, &mut writer, path)?,
        _ => {
            return Err(ExportError::UnknownFormat {
                path: path.to_path_buf(),
            }
            .into())
        }
    };

    // Flushing in Drop would swallow a final-write failure and let the
    // success message print over a truncated file.
    writer.flush().map_err(|e| LogScopeError::Io {
        path: path.to_path_buf(),
        operation: "flush",
        source: e,
    })?;

    Ok(written)
}
