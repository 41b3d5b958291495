// logscope - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Config validation checks user-supplied values against these ranges.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "logscope";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "logscope";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Engine
// =============================================================================

/// Number of hour-of-day buckets in the traffic profile. Fixed so that
/// chart consumers always get a stable 24-entry x-axis.
pub const HOURS_PER_DAY: usize = 24;

/// Status code below which a request counts as successful.
pub const SUCCESS_STATUS_THRESHOLD: u16 = 400;

/// Largest valid UTC offset for hour bucketing, in minutes (UTC+14:00,
/// the easternmost civil offset in use). The westernmost is -12:00 but
/// the symmetric bound keeps validation simple.
pub const MAX_UTC_OFFSET_MINUTES: i16 = 14 * 60;

// =============================================================================
// Mock batch generation
// =============================================================================

/// Default number of records in a generated mock batch.
pub const DEFAULT_MOCK_COUNT: usize = 250;

/// Minimum user-configurable mock batch size.
pub const MIN_MOCK_COUNT: usize = 1;

/// Maximum user-configurable mock batch size. The engine recomputes all
/// derived views from scratch on every ingest, so batches are kept small.
pub const MAX_MOCK_COUNT: usize = 100_000;

/// Default time span, in hours, over which mock timestamps are spread
/// backwards from "now".
pub const DEFAULT_MOCK_SPAN_HOURS: u32 = 24;

/// Maximum mock timestamp span in hours (30 days).
pub const MAX_MOCK_SPAN_HOURS: u32 = 24 * 30;

// =============================================================================
// Watch mode
// =============================================================================

/// Minimum poll-and-replace refresh interval in seconds.
pub const MIN_WATCH_INTERVAL_SECS: u64 = 1;

/// Maximum poll-and-replace refresh interval in seconds.
pub const MAX_WATCH_INTERVAL_SECS: u64 = 3_600;

// =============================================================================
// Report
// =============================================================================

/// Default number of rows printed by the filtered-record table.
pub const DEFAULT_TABLE_ROWS: usize = 20;

/// Width in characters of the histogram bar for the busiest hour.
pub const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Latency at or above which the report switches from "NNN ms" to "N.NN s".
pub const LATENCY_SECONDS_THRESHOLD_MS: u64 = 1_000;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 5_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
