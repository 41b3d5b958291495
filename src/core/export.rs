// logscope - core/export.rs
//
// CSV and JSON export of a filtered record view.
// Core layer: writes to any Write trait object; the caller owns file
// creation and path handling.

use crate::core::model::LogRecord;
use crate::util::constants::MAX_EXPORT_RECORDS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV.
///
/// Columns: id, timestamp, ip, method, endpoint, status, latency_ms,
/// success, size_bytes, user_agent, location. Extended fields are left
/// out of the CSV shape; use JSON export for the full wire record.
///
/// Returns the number of records written.
pub fn export_csv<W: Write>(
    records: &[&LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_cap(records.len())?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "timestamp",
            "ip",
            "method",
            "endpoint",
            "status",
            "latency_ms",
            "success",
            "size_bytes",
            "user_agent",
            "location",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    for record in records {
        let timestamp = record.timestamp.to_rfc3339();
        let status = record.status_code.to_string();
        let latency = record.latency_ms.to_string();
        let success = record.success.to_string();
        let size = record.response_size_bytes.to_string();

        csv_writer
            .write_record([
                record.id.as_str(),
                timestamp.as_str(),
                record.source_ip.as_str(),
                record.method.as_str(),
                record.endpoint.as_str(),
                status.as_str(),
                latency.as_str(),
                success.as_str(),
                size.as_str(),
                record.user_agent.as_str(),
                record.location.as_str(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON (pretty-printed array in wire field naming).
pub fn export_json<W: Write>(
    records: &[&LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_cap(records.len())?;

    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

fn check_cap(count: usize) -> Result<(), ExportError> {
    if count > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count,
            max: MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}
