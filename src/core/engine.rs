// logscope - core/engine.rs
//
// The log analytics engine: owns the current record set and derives
// summary metrics, the 24-bucket hourly profile, and filtered views.
// Core layer: pure logic, no I/O, no background work.

use crate::core::filter::{apply_criteria, FilterCriteria, SearchField};
use crate::core::model::{HourlyBucket, LogRecord, MetricsSummary};
use crate::util::constants::{HOURS_PER_DAY, MAX_UTC_OFFSET_MINUTES};
use crate::util::error::ConfigError;
use chrono::{FixedOffset, Timelike};
use std::collections::HashSet;

// =============================================================================
// Options
// =============================================================================

/// How the engine classifies a record as success or failure when
/// computing the summary and the hourly profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Trust the producer-assigned `success` flag as-is. This mirrors
    /// producers that compute the flag once at ingestion time.
    #[default]
    TrustRecord,

    /// Ignore the stored flag and re-derive success from
    /// `status_code < 400`. For backends that may send the two fields
    /// inconsistently.
    DeriveFromStatus,
}

/// Engine configuration. Construct with `Default` (UTC, trust the
/// record, search all textual fields) and adjust via the builders.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Offset from UTC, in minutes, used for every hour-of-day
    /// extraction (bucketing and hour-range filtering). Private so the
    /// validated civil-offset invariant holds.
    utc_offset_minutes: i16,

    /// Success classification policy for summary and buckets.
    pub success_policy: SuccessPolicy,

    /// Fields the substring search scans, OR-combined.
    pub search_fields: Vec<SearchField>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            success_policy: SuccessPolicy::default(),
            search_fields: SearchField::all(),
        }
    }
}

impl EngineOptions {
    /// Set the bucketing timezone as a UTC offset in minutes.
    ///
    /// The offset is explicit and caller-supplied: relying on the
    /// process-ambient local timezone would make the same batch bucket
    /// differently on different hosts.
    pub fn with_utc_offset_minutes(mut self, minutes: i16) -> Result<Self, ConfigError> {
        // Range check rather than abs(): i16::MIN has no positive
        // counterpart, so negation would overflow on it.
        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
            return Err(ConfigError::InvalidUtcOffset {
                minutes: i32::from(minutes),
                max: MAX_UTC_OFFSET_MINUTES,
            });
        }
        self.utc_offset_minutes = minutes;
        Ok(self)
    }

    /// Set the success classification policy.
    pub fn with_success_policy(mut self, policy: SuccessPolicy) -> Self {
        self.success_policy = policy;
        self
    }

    /// Replace the searchable-field set.
    pub fn with_search_fields(mut self, fields: Vec<SearchField>) -> Self {
        self.search_fields = fields;
        self
    }

    /// The configured UTC offset in minutes.
    pub fn utc_offset_minutes(&self) -> i16 {
        self.utc_offset_minutes
    }

    /// The configured offset as a chrono timezone. The offset was
    /// validated to the civil range at construction, so conversion
    /// cannot fail; the fallback to UTC is unreachable.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(i32::from(self.utc_offset_minutes) * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is a valid timezone"))
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Owns a replaceable collection of log records and answers derived
/// queries over it.
///
/// The engine has exactly one piece of state — the current record set —
/// and two kinds of transition: [`ingest`](Self::ingest) replaces the
/// set wholesale, and the query methods ([`summary`](Self::summary),
/// [`hourly_buckets`](Self::hourly_buckets), [`filter`](Self::filter))
/// are side-effect-free reads. Derived views are recomputed from
/// scratch on every call; with batches of a few hundred records there
/// is nothing to gain from incremental maintenance.
///
/// The engine is single-threaded by design. Embedders that need shared
/// access should wrap whole engines (or record-set snapshots) and swap
/// them atomically, so readers always observe a complete batch.
#[derive(Debug, Default)]
pub struct LogAnalyticsEngine {
    records: Vec<LogRecord>,
    options: EngineOptions,
}

impl LogAnalyticsEngine {
    /// An empty engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty engine with the given options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            records: Vec::new(),
            options,
        }
    }

    /// The engine's configuration.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replace the current record set with a new batch.
    ///
    /// Whole-collection replace, not append: this models a
    /// poll-and-refresh data source that re-delivers the full set each
    /// cycle. The batch may be empty and records are accepted
    /// permissively — no field validation, no de-duplication, no
    /// ordering requirement.
    pub fn ingest<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = LogRecord>,
    {
        self.records = batch.into_iter().collect();
        tracing::debug!(records = self.records.len(), "Ingested record batch");
    }

    /// The current record set, in ingestion order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compute aggregate metrics over the current record set.
    ///
    /// Pure and idempotent: the same record set always yields the same
    /// summary. An empty set yields the zero-valued summary rather than
    /// NaN rates.
    pub fn summary(&self) -> MetricsSummary {
        if self.records.is_empty() {
            return MetricsSummary::empty();
        }

        let total = self.records.len();
        let mut failed = 0usize;
        let mut latency_sum = 0u128;
        let mut peak = 0u64;
        let mut clients: HashSet<&str> = HashSet::new();

        for record in &self.records {
            if !self.classify_success(record) {
                failed += 1;
            }
            latency_sum += u128::from(record.latency_ms);
            peak = peak.max(record.latency_ms);
            clients.insert(record.source_ip.as_str());
        }

        MetricsSummary {
            total_requests: total,
            failed_requests: failed,
            average_latency_ms: latency_sum as f64 / total as f64,
            unique_client_count: clients.len(),
            success_rate_percent: (total - failed) as f64 / total as f64 * 100.0,
            peak_latency_ms: peak,
        }
    }

    /// Compute the 24-bucket hourly traffic profile, ordered 00..23.
    ///
    /// Always returns exactly [`HOURS_PER_DAY`] buckets, zero-filled
    /// where no records fall, so chart consumers get a stable x-axis.
    /// Bucketing is by hour of day in the configured timezone and
    /// collapses multi-day batches into one day-shaped profile; see
    /// [`HourlyBucket`].
    pub fn hourly_buckets(&self) -> Vec<HourlyBucket> {
        let timezone = self.options.timezone();
        let mut buckets: Vec<HourlyBucket> = (0..HOURS_PER_DAY).map(HourlyBucket::empty).collect();

        for record in &self.records {
            let hour = record.timestamp.with_timezone(&timezone).hour() as usize;
            let bucket = &mut buckets[hour % HOURS_PER_DAY];
            bucket.total_count += 1;
            if self.classify_success(record) {
                bucket.success_count += 1;
            } else {
                bucket.error_count += 1;
            }
        }

        buckets
    }

    /// Answer a filter query with borrowed records, in ingestion order.
    ///
    /// All criteria are optional and AND-combined; an empty criteria
    /// object returns the full set. Neither the record set nor the
    /// criteria are mutated.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&LogRecord> {
        self.filter_indices(criteria)
            .into_iter()
            .map(|idx| &self.records[idx])
            .collect()
    }

    /// Like [`filter`](Self::filter) but returning indices into
    /// [`records`](Self::records), for callers that keep a virtual view
    /// over the underlying slice.
    pub fn filter_indices(&self, criteria: &FilterCriteria) -> Vec<usize> {
        apply_criteria(
            &self.records,
            criteria,
            self.options.timezone(),
            &self.options.search_fields,
        )
    }

    /// Success/failure classification per the configured policy.
    fn classify_success(&self, record: &LogRecord) -> bool {
        match self.options.success_policy {
            SuccessPolicy::TrustRecord => record.success,
            SuccessPolicy::DeriveFromStatus => record.derived_success(),
        }
    }
}
