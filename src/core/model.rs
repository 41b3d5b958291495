// logscope - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no
// presentation, no platform dependencies.
//
// These types are the shared vocabulary across all layers. The serde
// renames on LogRecord pin the JSON wire contract a backend (or the
// bundled mock source) delivers batches in.

use crate::util::constants::SUCCESS_STATUS_THRESHOLD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Log Record (one observed API request/response event)
// =============================================================================

/// A single API access log event, immutable once created.
///
/// This is the unit that flows through aggregation, filtering, and
/// export. Records are accepted permissively: unrecognised methods and
/// out-of-range status codes are carried as-is rather than rejected, so
/// a misbehaving upstream can never crash the analytics path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Opaque unique identifier. Uniqueness is the producer's problem;
    /// the engine never keys on it.
    pub id: String,

    /// Moment the request was observed, UTC.
    pub timestamp: DateTime<Utc>,

    /// Client address (dotted quad or arbitrary string).
    #[serde(rename = "ip")]
    pub source_ip: String,

    /// HTTP verb. Deliberately an open string, not an enum: unknown
    /// verbs must pass through untouched.
    pub method: String,

    /// Request path.
    pub endpoint: String,

    /// HTTP status code.
    #[serde(rename = "status")]
    pub status_code: u16,

    /// End-to-end request duration in milliseconds.
    #[serde(rename = "latency")]
    pub latency_ms: u64,

    /// Time spent in the proxy tier, when the producer reports it.
    #[serde(
        rename = "proxyLatency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub proxy_latency_ms: Option<u64>,

    /// Producer-assigned success flag, conventionally `status < 400`.
    /// Stored rather than re-derived; whether the engine trusts it is
    /// governed by [`SuccessPolicy`](crate::core::engine::SuccessPolicy).
    pub success: bool,

    /// Client user agent, uninterpreted.
    pub user_agent: String,

    /// Response body size in bytes.
    #[serde(rename = "size")]
    pub response_size_bytes: u64,

    /// Geographic or logical origin label, uninterpreted.
    pub location: String,

    // -- Extended fields, present only in enriched feeds --
    /// Calling application display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    /// Calling application identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// End-user display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// End-user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Named API product the endpoint belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
}

impl LogRecord {
    /// Success as derived from the status code alone, ignoring the
    /// stored `success` flag.
    pub fn derived_success(&self) -> bool {
        self.status_code < SUCCESS_STATUS_THRESHOLD
    }

    /// Coarse status classification for display grouping.
    pub fn status_family(&self) -> StatusFamily {
        StatusFamily::of(self.status_code)
    }
}

// =============================================================================
// Status family
// =============================================================================

/// Coarse classification of a status code by hundreds range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusFamily {
    /// [200, 300)
    Success,
    /// [300, 400)
    Redirect,
    /// [400, 500)
    ClientError,
    /// [500, ∞)
    ServerError,
    /// Below 200 (informational or nonsense input, carried anyway).
    Other,
}

impl StatusFamily {
    /// Classify a raw status code.
    pub fn of(status_code: u16) -> Self {
        match status_code {
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500.. => Self::ServerError,
            _ => Self::Other,
        }
    }

    /// Short label for compact display (e.g. table columns).
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Success => "2xx",
            Self::Redirect => "3xx",
            Self::ClientError => "4xx",
            Self::ServerError => "5xx",
            Self::Other => "1xx",
        }
    }
}

impl std::fmt::Display for StatusFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_label())
    }
}

// =============================================================================
// Metrics Summary (derived, recomputed on demand)
// =============================================================================

/// Aggregate metrics over the current record set.
///
/// Never persisted; recomputed from scratch on demand. All averages and
/// rates are defined as 0.0 for an empty set — there is no NaN path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    /// Count of records in the set.
    pub total_requests: usize,

    /// Count of records classified as failed.
    pub failed_requests: usize,

    /// Arithmetic mean of `latency_ms`, unrounded. 0.0 when empty.
    pub average_latency_ms: f64,

    /// Cardinality of distinct `source_ip` values.
    pub unique_client_count: usize,

    /// `(total - failed) / total * 100`. 0.0 when empty.
    pub success_rate_percent: f64,

    /// Maximum `latency_ms` over the set. 0 when empty.
    pub peak_latency_ms: u64,
}

impl MetricsSummary {
    /// The zero-valued summary returned for an empty record set.
    pub fn empty() -> Self {
        Self {
            total_requests: 0,
            failed_requests: 0,
            average_latency_ms: 0.0,
            unique_client_count: 0,
            success_rate_percent: 0.0,
            peak_latency_ms: 0,
        }
    }
}

// =============================================================================
// Hourly Bucket (derived time series, always 24 entries)
// =============================================================================

/// One hour-of-day slot in the 24-bucket traffic profile.
///
/// Bucketing is by wall-clock hour in the engine's configured timezone,
/// independent of calendar day: a Monday 09:14 record and a Tuesday
/// 09:50 record land in the same "09:00" bucket. Multi-day batches are
/// therefore collapsed into a single day-shaped profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    /// Fixed "HH:00" label for hour 0..=23.
    pub hour_label: String,

    /// Records whose hour matches.
    pub total_count: usize,

    /// Matching records classified as successful.
    pub success_count: usize,

    /// Matching records classified as failed.
    pub error_count: usize,
}

impl HourlyBucket {
    /// An empty bucket for the given hour of day.
    pub fn empty(hour: usize) -> Self {
        Self {
            hour_label: format!("{hour:02}:00"),
            total_count: 0,
            success_count: 0,
            error_count: 0,
        }
    }
}
