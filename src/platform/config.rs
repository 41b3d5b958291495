// logscope - platform/config.rs
//
// Platform-specific configuration: data directory resolution and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for logscope data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logscope/).
    pub config_dir: PathBuf,

    /// Data directory for exports and caches.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility — a
/// newer config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[engine]` section.
    pub engine: EngineSection,
    /// `[mock]` section.
    pub mock: MockSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[engine]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Bucketing timezone as a UTC offset in minutes.
    pub utc_offset_minutes: Option<i32>,
    /// Success classification: "trust" or "derive".
    pub success_policy: Option<String>,
    /// Searchable field names for the text filter.
    pub search_fields: Option<Vec<String>>,
}

/// `[mock]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MockSection {
    /// Records per generated batch.
    pub count: Option<usize>,
    /// Hours of history mock timestamps span.
    pub span_hours: Option<u32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to
/// defaults. Field names the core layer must interpret (search fields)
/// are carried as raw strings; this layer stays core-free.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Engine --
    /// Bucketing timezone as a UTC offset in minutes.
    pub utc_offset_minutes: i16,
    /// Re-derive success from the status code instead of trusting the
    /// record's flag.
    pub derive_success: bool,
    /// Searchable field names, unvalidated (the engine owns the names).
    pub search_fields: Option<Vec<String>>,

    // -- Mock --
    /// Records per generated batch.
    pub mock_count: usize,
    /// Hours of history mock timestamps span.
    pub mock_span_hours: u32,

    // -- Logging --
    /// Logging level string (consumed before tracing init).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            derive_success: false,
            search_fields: None,
            mock_count: constants::DEFAULT_MOCK_COUNT,
            mock_span_hours: constants::DEFAULT_MOCK_SPAN_HOURS,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no
/// warnings (first-run). If the file is unparseable, returns defaults
/// with an error warning — the application still starts but the user is
/// informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all
    // problems rather than stopping at the first.
    let mut config = AppConfig::default();

    // -- Engine: utc_offset_minutes --
    if let Some(offset) = raw.engine.utc_offset_minutes {
        let max = i32::from(constants::MAX_UTC_OFFSET_MINUTES);
        if (-max..=max).contains(&offset) {
            config.utc_offset_minutes = offset as i16;
        } else {
            warnings.push(format!(
                "[engine] utc_offset_minutes = {offset} is out of range (-{max}..={max}). Using default (0).",
            ));
        }
    }

    // -- Engine: success_policy --
    if let Some(ref policy) = raw.engine.success_policy {
        match policy.to_lowercase().as_str() {
            "trust" => config.derive_success = false,
            "derive" => config.derive_success = true,
            other => {
                warnings.push(format!(
                    "[engine] success_policy = \"{other}\" is not recognised. Expected \"trust\" or \"derive\". Using default (trust).",
                ));
            }
        }
    }

    // -- Engine: search_fields (names validated by the engine layer) --
    if let Some(ref fields) = raw.engine.search_fields {
        if fields.is_empty() {
            warnings.push(
                "[engine] search_fields is empty; text search would match nothing. Using defaults."
                    .to_string(),
            );
        } else {
            config.search_fields = Some(fields.clone());
        }
    }

    // -- Mock: count --
    if let Some(count) = raw.mock.count {
        if (constants::MIN_MOCK_COUNT..=constants::MAX_MOCK_COUNT).contains(&count) {
            config.mock_count = count;
        } else {
            warnings.push(format!(
                "[mock] count = {count} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MOCK_COUNT,
                constants::MAX_MOCK_COUNT,
                constants::DEFAULT_MOCK_COUNT,
            ));
        }
    }

    // -- Mock: span_hours --
    if let Some(span) = raw.mock.span_hours {
        if (1..=constants::MAX_MOCK_SPAN_HOURS).contains(&span) {
            config.mock_span_hours = span;
        } else {
            warnings.push(format!(
                "[mock] span_hours = {span} is out of range (1-{}). Using default ({}).",
                constants::MAX_MOCK_SPAN_HOURS,
                constants::DEFAULT_MOCK_SPAN_HOURS,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
