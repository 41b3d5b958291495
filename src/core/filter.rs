// logscope - core/filter.rs
//
// Composable filter engine for access log records.
// All active criteria are AND-combined; the text search is OR-combined
// across the configured searchable fields.
// Core layer: pure logic, no I/O or presentation dependencies.

use crate::core::model::LogRecord;
use crate::util::constants::SUCCESS_STATUS_THRESHOLD;
use crate::util::error::ConfigError;
use chrono::{FixedOffset, Timelike};

/// Sentinel method value meaning "no method filtering". Dashboard-style
/// producers send it literally instead of omitting the field.
pub const METHOD_ALL: &str = "all";

// =============================================================================
// Criteria
// =============================================================================

/// A transient filter query. All fields are optional and independent;
/// an omitted field (or its sentinel) matches everything.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring search across the engine's configured
    /// searchable fields. None or empty = no filter.
    pub search_text: Option<String>,

    /// Exact HTTP verb match. None or `"all"` = no filter.
    pub method: Option<String>,

    /// Two-way status classification filter.
    pub status_class: StatusClassFilter,

    /// Inclusive hour-of-day window, from an interactive chart brush.
    /// An inverted range (start > end) matches nothing; there is no
    /// midnight wraparound.
    pub hour_range: Option<HourRange>,
}

impl FilterCriteria {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.effective_search().is_none()
            && self.effective_method().is_none()
            && self.status_class == StatusClassFilter::All
            && self.hour_range.is_none()
    }

    /// The search text, with None/empty collapsed to None.
    fn effective_search(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }

    /// The method filter, with None/empty/"all" collapsed to None.
    pub(crate) fn effective_method(&self) -> Option<&str> {
        self.method
            .as_deref()
            .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case(METHOD_ALL))
    }
}

/// Status-class criterion: partition by the `status < 400` rule.
///
/// Always evaluated against the status code itself, regardless of the
/// engine's success policy — the stored `success` flag plays no part in
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusClassFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only records with `status_code < 400`.
    Success,
    /// Only records with `status_code >= 400`.
    Error,
}

impl StatusClassFilter {
    /// Parse a dashboard-style class name ("all", "success", "error").
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::UnknownStatusClass {
                name: name.to_string(),
            }),
        }
    }
}

/// Inclusive hour-of-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    /// First hour included, 0..=23.
    pub start: u8,
    /// Last hour included, 0..=23.
    pub end: u8,
}

impl HourRange {
    /// Build a range, rejecting hours outside 0..=23. An inverted range
    /// (start > end) is accepted — it is a valid query that matches
    /// nothing.
    pub fn new(start: u8, end: u8) -> Result<Self, ConfigError> {
        for value in [start, end] {
            if value > 23 {
                return Err(ConfigError::InvalidHour {
                    value: u32::from(value),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Naive inclusive containment, no wraparound.
    fn contains(&self, hour: u8) -> bool {
        hour >= self.start && hour <= self.end
    }
}

// =============================================================================
// Searchable fields
// =============================================================================

/// Textual record fields the substring search may scan. Extended fields
/// that are absent on a record simply never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Endpoint,
    ApplicationName,
    UserName,
    ApiName,
}

impl SearchField {
    /// All fields, the default search configuration.
    pub fn all() -> Vec<SearchField> {
        vec![
            Self::Endpoint,
            Self::ApplicationName,
            Self::UserName,
            Self::ApiName,
        ]
    }

    /// Parse a config/CLI field name.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "endpoint" => Ok(Self::Endpoint),
            "application" => Ok(Self::ApplicationName),
            "user" => Ok(Self::UserName),
            "api" => Ok(Self::ApiName),
            _ => Err(ConfigError::UnknownSearchField {
                name: name.to_string(),
            }),
        }
    }

    /// The field's value on a record, when present.
    fn value<'a>(&self, record: &'a LogRecord) -> Option<&'a str> {
        match self {
            Self::Endpoint => Some(&record.endpoint),
            Self::ApplicationName => record.application_name.as_deref(),
            Self::UserName => record.user_name.as_deref(),
            Self::ApiName => record.api_name.as_deref(),
        }
    }
}

// =============================================================================
// Application
// =============================================================================

/// Apply criteria to a slice of records, returning indices of matches.
///
/// Returns a Vec of indices into the original slice, in slice order.
/// This avoids copying records and lets callers build borrowed or
/// owned views as needed. With no active criteria every index is
/// returned, so the identity query is order-preserving by construction.
///
/// `timezone` governs the hour-of-day extraction for `hour_range`; it
/// must match the offset used for bucketing or brush selections made on
/// the chart will select the wrong records.
pub fn apply_criteria(
    records: &[LogRecord],
    criteria: &FilterCriteria,
    timezone: FixedOffset,
    search_fields: &[SearchField],
) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..records.len()).collect();
    }

    let needle = criteria
        .effective_search()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, criteria, &needle, timezone, search_fields))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active criteria.
fn matches_all(
    record: &LogRecord,
    criteria: &FilterCriteria,
    needle: &str,
    timezone: FixedOffset,
    search_fields: &[SearchField],
) -> bool {
    // Text search: OR across configured fields.
    if !needle.is_empty() {
        let hit = search_fields
            .iter()
            .filter_map(|field| field.value(record))
            .any(|value| value.to_lowercase().contains(needle));
        if !hit {
            return false;
        }
    }

    // Exact method match.
    if let Some(method) = criteria.effective_method() {
        if record.method != method {
            return false;
        }
    }

    // Status class, always from the status code.
    match criteria.status_class {
        StatusClassFilter::All => {}
        StatusClassFilter::Success => {
            if record.status_code >= SUCCESS_STATUS_THRESHOLD {
                return false;
            }
        }
        StatusClassFilter::Error => {
            if record.status_code < SUCCESS_STATUS_THRESHOLD {
                return false;
            }
        }
    }

    // Hour-of-day window.
    if let Some(range) = criteria.hour_range {
        let hour = record.timestamp.with_timezone(&timezone).hour() as u8;
        if !range.contains(hour) {
            return false;
        }
    }

    true
}
