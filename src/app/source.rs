// logscope - app/source.rs
//
// Batch sources: where a record batch comes from before the engine
// ingests it. The engine itself never does I/O; this is the
// "collector" collaborator, either the bundled mock generator or a
// wire-format JSON file a real backend produced.

use crate::core::mock::{self, MockConfig};
use crate::core::model::LogRecord;
use crate::util::error::IngestError;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

/// A source that can deliver a full record batch on demand.
///
/// Each `load` returns a complete replacement set, matching the
/// engine's poll-and-replace ingestion model.
#[derive(Debug, Clone)]
pub enum BatchSource {
    /// Generate a pseudo-random batch.
    Mock(MockConfig),

    /// Read a JSON array of wire-named records from a file.
    JsonFile(PathBuf),
}

impl BatchSource {
    /// Produce the next batch. `now` anchors mock timestamps and is
    /// ignored for file sources.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Vec<LogRecord>, IngestError> {
        match self {
            Self::Mock(config) => Ok(mock::generate_batch(config, now)),
            Self::JsonFile(path) => {
                let content = fs::read_to_string(path).map_err(|e| IngestError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                let records: Vec<LogRecord> =
                    serde_json::from_str(&content).map_err(|e| IngestError::Json {
                        path: path.clone(),
                        source: e,
                    })?;
                tracing::info!(
                    records = records.len(),
                    path = %path.display(),
                    "Loaded record batch from file"
                );
                Ok(records)
            }
        }
    }

    /// One-line description for the report header.
    pub fn describe(&self) -> String {
        match self {
            Self::Mock(config) => match config.seed {
                Some(seed) => format!("mock data ({} records, seed {seed})", config.count),
                None => format!("mock data ({} records)", config.count),
            },
            Self::JsonFile(path) => format!("batch file {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mock_source_delivers_requested_count() {
        let source = BatchSource::Mock(MockConfig {
            count: 12,
            span_hours: 24,
            seed: Some(3),
        });
        let batch = source.load(Utc::now()).unwrap();
        assert_eq!(batch.len(), 12);
    }

    #[test]
    fn json_file_source_round_trips_wire_records() {
        let batch = mock::generate_batch(
            &MockConfig {
                count: 5,
                span_hours: 24,
                seed: Some(11),
            },
            Utc::now(),
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&batch).unwrap().as_bytes())
            .unwrap();

        let source = BatchSource::JsonFile(file.path().to_path_buf());
        let loaded = source.load(Utc::now()).unwrap();
        assert_eq!(loaded, batch);
    }

    #[test]
    fn missing_file_is_an_io_ingest_error() {
        let source = BatchSource::JsonFile(PathBuf::from("/nonexistent/batch.json"));
        let result = source.load(Utc::now());
        assert!(matches!(result, Err(IngestError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_a_json_ingest_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"not\": \"an array\"}").unwrap();

        let source = BatchSource::JsonFile(file.path().to_path_buf());
        let result = source.load(Utc::now());
        assert!(matches!(result, Err(IngestError::Json { .. })));
    }
}
