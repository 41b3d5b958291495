// logscope - app/report.rs
//
// Text presentation of engine outputs: summary block, hourly histogram,
// and filtered-record table. All formatting decisions (rounding, ms→s
// conversion, digit grouping, truncation) live here — the core layer
// hands over raw numbers only.

use crate::core::model::{HourlyBucket, LogRecord, MetricsSummary};
use crate::util::constants::{HISTOGRAM_BAR_WIDTH, LATENCY_SECONDS_THRESHOLD_MS};
use std::fmt::Write;

/// Render the summary metrics block.
pub fn render_summary(summary: &MetricsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Requests        {:>12}", group_digits(summary.total_requests as u64));
    let _ = writeln!(out, "Failed          {:>12}", group_digits(summary.failed_requests as u64));
    let _ = writeln!(out, "Success rate    {:>11.1}%", summary.success_rate_percent);
    let _ = writeln!(out, "Unique clients  {:>12}", group_digits(summary.unique_client_count as u64));
    let _ = writeln!(out, "Avg latency     {:>12}", format_latency(summary.average_latency_ms.round() as u64));
    let _ = writeln!(out, "Peak latency    {:>12}", format_latency(summary.peak_latency_ms));
    out
}

/// Render the 24-bucket traffic profile as an ASCII histogram.
///
/// One line per hour, bar scaled so the busiest hour fills
/// [`HISTOGRAM_BAR_WIDTH`] characters. Error counts are shown inline
/// when non-zero.
pub fn render_histogram(buckets: &[HourlyBucket]) -> String {
    let max_count = buckets.iter().map(|b| b.total_count).max().unwrap_or(0);
    let mut out = String::new();

    for bucket in buckets {
        let width = if max_count == 0 {
            0
        } else {
            bucket.total_count * HISTOGRAM_BAR_WIDTH / max_count
        };
        let bar: String = "#".repeat(width);
        let _ = write!(
            out,
            "{} |{:<bar_width$} {:>5}",
            bucket.hour_label,
            bar,
            bucket.total_count,
            bar_width = HISTOGRAM_BAR_WIDTH
        );
        if bucket.error_count > 0 {
            let _ = write!(out, "  ({} errors)", bucket.error_count);
        }
        out.push('\n');
    }

    out
}

/// Render a fixed-width table of filtered records, up to `limit` rows.
pub fn render_table(records: &[&LogRecord], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<20} {:<7} {:<32} {:<7} {:>9}  {}",
        "ID", "TIMESTAMP", "METHOD", "ENDPOINT", "STATUS", "LATENCY", "CLIENT"
    );

    for record in records.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<12} {:<20} {:<7} {:<32} {:>3} {:<3} {:>9}  {}",
            truncate(&record.id, 12),
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            truncate(&record.method, 7),
            truncate(&record.endpoint, 32),
            record.status_code,
            record.status_family().short_label(),
            format_latency(record.latency_ms),
            record.source_ip,
        );
    }

    if records.len() > limit {
        let _ = writeln!(out, "... {} more records (raise --table to see them)", records.len() - limit);
    }

    out
}

/// Human latency: "430 ms" below the threshold, "1.43 s" at or above.
pub fn format_latency(latency_ms: u64) -> String {
    if latency_ms >= LATENCY_SECONDS_THRESHOLD_MS {
        format!("{:.2} s", latency_ms as f64 / 1_000.0)
    } else {
        format!("{latency_ms} ms")
    }
}

/// Group digits with commas: 1234567 -> "1,234,567".
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        // Reserve one slot for the ellipsis marker.
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }

    #[test]
    fn latency_switches_to_seconds() {
        assert_eq!(format_latency(0), "0 ms");
        assert_eq!(format_latency(999), "999 ms");
        assert_eq!(format_latency(1_000), "1.00 s");
        assert_eq!(format_latency(1_430), "1.43 s");
    }

    #[test]
    fn histogram_renders_one_line_per_bucket() {
        let buckets: Vec<HourlyBucket> = (0..24usize).map(HourlyBucket::empty).collect();
        let output = render_histogram(&buckets);
        assert_eq!(output.lines().count(), 24);
        assert!(output.starts_with("00:00 |"));
        assert!(output.contains("23:00 |"));
    }

    #[test]
    fn histogram_scales_to_busiest_hour() {
        let mut buckets: Vec<HourlyBucket> = (0..24usize).map(HourlyBucket::empty).collect();
        buckets[9].total_count = 10;
        buckets[9].success_count = 10;
        buckets[10].total_count = 5;
        buckets[10].success_count = 3;
        buckets[10].error_count = 2;

        let output = render_histogram(&buckets);
        let full_bar = "#".repeat(HISTOGRAM_BAR_WIDTH);
        let half_bar = "#".repeat(HISTOGRAM_BAR_WIDTH / 2);
        assert!(output.contains(&full_bar));
        assert!(output.contains(&half_bar));
        assert!(output.contains("(2 errors)"));
    }

    #[test]
    fn summary_block_contains_grouped_counts() {
        let summary = MetricsSummary {
            total_requests: 12_500,
            failed_requests: 321,
            average_latency_ms: 183.333,
            unique_client_count: 48,
            success_rate_percent: 97.432,
            peak_latency_ms: 2_110,
        };
        let output = render_summary(&summary);
        assert!(output.contains("12,500"));
        assert!(output.contains("97.4%"));
        assert!(output.contains("183 ms"));
        assert!(output.contains("2.11 s"));
    }
}
