//! Record sources
//!
//! Thin collaborators that feed the publishing pipeline: a periodic reading
//! generator producing `(timestamp, value)` records, and a loader that turns
//! local files into `(base64, filename)` file records.

use crate::record::{Record, FILENAME_KEY, PAYLOAD_KEY};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;
use serde_json::{json, Value};
use std::path::Path;

/// Record source errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("path has no usable filename: {0}")]
    NoFilename(String),
}

/// Produce one simulated reading, stamped with the current time.
pub fn sample_reading() -> Record {
    let value: f64 = rand::thread_rng().gen_range(0.0..100.0);
    reading(chrono::Utc::now().timestamp(), value)
}

/// Build a plain reading record from explicit parts.
pub fn reading(timestamp: i64, value: f64) -> Record {
    let mut record = Record::new();
    record.insert("timestamp".to_string(), json!(timestamp));
    record.insert("value".to_string(), json!(value));
    record
}

/// Read a local file and build a file record from its contents.
///
/// The payload is standard base64; the filename is the final path
/// component.
pub fn load_file_record(path: &Path) -> Result<Record, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SourceError::NoFilename(path.display().to_string()))?;

    let mut record = Record::new();
    record.insert(
        PAYLOAD_KEY.to_string(),
        Value::String(STANDARD.encode(bytes)),
    );
    record.insert(
        FILENAME_KEY.to_string(),
        Value::String(filename.to_string()),
    );
    Ok(record)
}
