// logscope - core/mock.rs
//
// Pseudo-random access log batch generator, standing in for a real
// collector. Produces the same wire shape a backend would deliver so
// the rest of the pipeline cannot tell the difference.
//
// Seedable for reproducible batches in tests and demos. The generated
// `success` flag is always consistent with the status code, matching a
// producer that computes it once at ingestion time.

use crate::core::model::LogRecord;
use crate::util::constants::{DEFAULT_MOCK_COUNT, DEFAULT_MOCK_SPAN_HOURS};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// =============================================================================
// Vocabulary
// =============================================================================

const METHODS: &[&str] = &["GET", "GET", "GET", "GET", "POST", "POST", "PUT", "DELETE", "PATCH"];

const ENDPOINTS: &[&str] = &[
    "/api/v1/orders",
    "/api/v1/orders/lookup",
    "/api/v1/users",
    "/api/v1/users/profile",
    "/api/v1/payments",
    "/api/v1/payments/refunds",
    "/api/v1/inventory",
    "/api/v1/search",
    "/api/v1/auth/token",
    "/api/v2/analytics/events",
];

/// Status codes weighted towards success, with a realistic error tail.
const STATUS_CODES: &[u16] = &[
    200, 200, 200, 200, 200, 200, 200, 200, 201, 201, 204, 301, 304, 400, 401, 403, 404, 404, 429,
    500, 502, 503,
];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2)",
    "okhttp/4.12.0",
    "python-requests/2.31",
    "curl/8.4.0",
    "PostmanRuntime/7.36",
];

const LOCATIONS: &[&str] = &[
    "us-east-1",
    "us-west-2",
    "eu-west-1",
    "eu-central-1",
    "ap-southeast-1",
    "ap-northeast-1",
];

const APPLICATIONS: &[(&str, &str)] = &[
    ("checkout-web", "app-001"),
    ("mobile-ios", "app-002"),
    ("mobile-android", "app-003"),
    ("partner-gateway", "app-004"),
    ("internal-batch", "app-005"),
];

const USERS: &[(&str, &str)] = &[
    ("alice.ng", "u-1001"),
    ("bruno.costa", "u-1002"),
    ("chen.wei", "u-1003"),
    ("dana.kim", "u-1004"),
    ("eli.fox", "u-1005"),
];

const API_NAMES: &[&str] = &["orders-api", "users-api", "payments-api", "catalog-api"];

// =============================================================================
// Configuration
// =============================================================================

/// Parameters for one generated batch.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of records to generate.
    pub count: usize,

    /// Timestamps are spread uniformly over this many hours before
    /// "now".
    pub span_hours: u32,

    /// RNG seed. None = entropy-seeded, a fresh batch every call.
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_MOCK_COUNT,
            span_hours: DEFAULT_MOCK_SPAN_HOURS,
            seed: None,
        }
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Generate a batch of pseudo-random access log records ending at `now`.
pub fn generate_batch(config: &MockConfig, now: DateTime<Utc>) -> Vec<LogRecord> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let span_secs = i64::from(config.span_hours.max(1)) * 3_600;
    let mut batch = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        batch.push(generate_record(&mut rng, now, span_secs));
    }

    tracing::debug!(
        records = batch.len(),
        span_hours = config.span_hours,
        seeded = config.seed.is_some(),
        "Generated mock batch"
    );

    batch
}

fn generate_record(rng: &mut StdRng, now: DateTime<Utc>, span_secs: i64) -> LogRecord {
    let status_code = *pick(rng, STATUS_CODES);
    let latency_ms = if rng.gen_bool(0.05) {
        // Occasional slow outlier so the peak metric has something to find.
        rng.gen_range(800..2_500)
    } else {
        rng.gen_range(5..400)
    };

    // Extended fields come and go as a group, simulating a feed that is
    // enriched for authenticated traffic only.
    let enriched = rng.gen_bool(0.6);
    let (application_name, application_id) = if enriched {
        let (name, id) = *pick(rng, APPLICATIONS);
        (Some(name.to_string()), Some(id.to_string()))
    } else {
        (None, None)
    };
    let (user_name, user_id) = if enriched {
        let (name, id) = *pick(rng, USERS);
        (Some(name.to_string()), Some(id.to_string()))
    } else {
        (None, None)
    };

    LogRecord {
        id: format!("req-{:012x}", rng.gen::<u64>() & 0xffff_ffff_ffff),
        timestamp: now - Duration::seconds(rng.gen_range(0..span_secs)),
        source_ip: format!(
            "{}.{}.{}.{}",
            rng.gen_range(1..=223u8),
            rng.gen_range(0..=255u8),
            rng.gen_range(0..=255u8),
            rng.gen_range(1..=254u8)
        ),
        method: (*pick(rng, METHODS)).to_string(),
        endpoint: (*pick(rng, ENDPOINTS)).to_string(),
        status_code,
        latency_ms,
        proxy_latency_ms: rng.gen_bool(0.5).then(|| rng.gen_range(1..40)),
        success: status_code < 400,
        user_agent: (*pick(rng, USER_AGENTS)).to_string(),
        response_size_bytes: rng.gen_range(120..64_000),
        location: (*pick(rng, LOCATIONS)).to_string(),
        application_name,
        application_id,
        user_name,
        user_id,
        api_name: enriched.then(|| (*pick(rng, API_NAMES)).to_string()),
    }
}

/// Choose from a non-empty constant slice. The vocabularies above are
/// all non-empty, so the fallback never triggers.
fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    items.choose(rng).unwrap_or(&items[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn generates_requested_count() {
        let config = MockConfig {
            count: 37,
            ..Default::default()
        };
        assert_eq!(generate_batch(&config, fixed_now()).len(), 37);
    }

    #[test]
    fn same_seed_reproduces_the_batch() {
        let config = MockConfig {
            count: 50,
            span_hours: 24,
            seed: Some(1234),
        };
        let a = generate_batch(&config, fixed_now());
        let b = generate_batch(&config, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let now = fixed_now();
        let a = generate_batch(
            &MockConfig {
                count: 50,
                span_hours: 24,
                seed: Some(1),
            },
            now,
        );
        let b = generate_batch(
            &MockConfig {
                count: 50,
                span_hours: 24,
                seed: Some(2),
            },
            now,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn success_flag_is_consistent_with_status() {
        let config = MockConfig {
            count: 200,
            span_hours: 24,
            seed: Some(7),
        };
        for record in generate_batch(&config, fixed_now()) {
            assert_eq!(record.success, record.status_code < 400, "{record:?}");
        }
    }

    #[test]
    fn timestamps_stay_within_span() {
        let now = fixed_now();
        let config = MockConfig {
            count: 200,
            span_hours: 6,
            seed: Some(99),
        };
        for record in generate_batch(&config, now) {
            assert!(record.timestamp <= now);
            assert!(now - record.timestamp <= Duration::hours(6));
        }
    }
}
