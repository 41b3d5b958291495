// logscope - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every wrapper keeps its cause.
//
// The aggregation core (summary, buckets, filtering) is infallible by
// contract and has no error type: malformed records pass through as-is
// and empty collections degrade to zero-valued outputs. Errors only
// arise at the edges — loading batches, writing exports, reading config.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all logscope operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogScopeError {
    /// Loading a record batch failed.
    Ingest(IngestError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "Ingest error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogScopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ingest(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<IngestError> for LogScopeError {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

impl From<ExportError> for LogScopeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

impl From<ConfigError> for LogScopeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a record batch from a wire-format file.
#[derive(Debug)]
pub enum IngestError {
    /// Batch file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// Batch file is not a valid JSON array of wire-named records.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read batch file '{}': {source}", path.display())
            }
            Self::Json { path, source } => write!(
                f,
                "batch file '{}' is not a valid record array: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors raised during CSV/JSON export of a filtered view.
#[derive(Debug)]
pub enum ExportError {
    /// CSV serialisation failed.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Underlying writer failed.
    Io { path: PathBuf, source: io::Error },

    /// The filtered view exceeds the export record cap.
    TooManyRecords { count: usize, max: usize },

    /// The export path has no recognised extension.
    UnknownFormat { path: PathBuf },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "CSV export to '{}' failed: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export to '{}' failed: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "write to '{}' failed: {source}", path.display())
            }
            Self::TooManyRecords { count, max } => {
                write!(f, "refusing to export {count} records (limit {max})")
            }
            Self::UnknownFormat { path } => write!(
                f,
                "cannot infer export format from '{}' (expected .csv or .json)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::TooManyRecords { .. } | Self::UnknownFormat { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors raised while building engine options or parsing CLI values.
/// config.toml problems degrade to warnings instead (the application
/// still starts with defaults); these errors are for values that were
/// requested explicitly and cannot be honoured.
#[derive(Debug)]
pub enum ConfigError {
    /// UTC offset outside the valid civil range.
    InvalidUtcOffset { minutes: i32, max: i16 },

    /// Hour value outside 0..=23.
    InvalidHour { value: u32 },

    /// Hour range flag could not be parsed (expected "START-END").
    MalformedHourRange { input: String },

    /// Unknown searchable-field name in config or CLI.
    UnknownSearchField { name: String },

    /// Unknown status-class name (expected all, success, or error).
    UnknownStatusClass { name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtcOffset { minutes, max } => write!(
                f,
                "UTC offset {minutes} min is out of range (-{max}..={max})"
            ),
            Self::InvalidHour { value } => {
                write!(f, "hour {value} is out of range (0-23)")
            }
            Self::MalformedHourRange { input } => write!(
                f,
                "cannot parse hour range '{input}' (expected START-END, e.g. 9-17)"
            ),
            Self::UnknownSearchField { name } => write!(
                f,
                "unknown search field '{name}' (expected endpoint, application, user, or api)"
            ),
            Self::UnknownStatusClass { name } => write!(
                f,
                "unknown status class '{name}' (expected all, success, or error)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
