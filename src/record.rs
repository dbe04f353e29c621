//! Record classification and formatting
//!
//! Validates a batch of caller-supplied records, decides whether it is a
//! plain data batch or a file batch, derives the action string actually
//! transmitted, and serializes each record to its wire form. Pure functions,
//! no I/O.
//!
//! A batch must be homogeneous: either no record carries a `base64` payload
//! (plain batch) or every record carries both `base64` and `filename` (file
//! batch). Classification happens once per publish call, before any network
//! activity, and is never re-evaluated mid-retry.

use serde_json::{Map, Value};
use std::str::FromStr;

/// Key that marks a record as a file record.
pub const PAYLOAD_KEY: &str = "base64";

/// Key carrying the original filename of a file record.
pub const FILENAME_KEY: &str = "filename";

/// Suffix appended to the transmitted action of a file batch.
const FILE_ACTION_SUFFIX: &str = "_files";

/// A single caller-supplied record: an opaque string → JSON value mapping.
pub type Record = Map<String, Value>;

/// Operations the middleware can be asked to perform on a batch.
///
/// Plain data batches accept `process` and `skip`; file batches additionally
/// accept `store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Process,
    Skip,
    Store,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Process => "process",
            Action::Skip => "skip",
            Action::Store => "store",
        }
    }
}

/// Error for action strings outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process" => Ok(Action::Process),
            "skip" => Ok(Action::Skip),
            "store" => Ok(Action::Store),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

/// Whether a batch consists of plain data records or file records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Plain,
    File,
}

/// A validated batch ready for request assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedBatch {
    /// One serialized JSON document per record, in submission order.
    pub data: Vec<String>,
    /// The action string actually transmitted (file batches carry `_files`).
    pub action: String,
    pub kind: BatchKind,
}

/// Batch validation failures.
///
/// All of these resolve locally, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("batch is empty")]
    NoData,
    #[error("some records carry a base64 payload and some do not")]
    Base64Inconsistent,
    #[error("file batch has records without a filename")]
    MissingFilename,
    #[error("action '{0}' is not valid for a file batch")]
    UnsupportedFileAction(String),
    #[error("action '{0}' is not valid for a plain data batch")]
    InvalidAction(String),
}

/// Validate a batch and produce its wire form.
///
/// Rules are checked in order and the first failure wins:
/// empty batch, payload consistency, filename pairing, then the
/// per-kind action rules. On success, every record is serialized to a
/// compact JSON string, order preserved.
pub fn classify_and_format(
    records: &[Record],
    action: &str,
) -> Result<FormattedBatch, ValidationError> {
    if records.is_empty() {
        return Err(ValidationError::NoData);
    }

    let with_payload = records
        .iter()
        .filter(|r| r.contains_key(PAYLOAD_KEY))
        .count();
    if with_payload > 0 && with_payload < records.len() {
        return Err(ValidationError::Base64Inconsistent);
    }

    let kind = if with_payload > 0 {
        BatchKind::File
    } else {
        BatchKind::Plain
    };

    if kind == BatchKind::File && records.iter().any(|r| !r.contains_key(FILENAME_KEY)) {
        return Err(ValidationError::MissingFilename);
    }

    let parsed = Action::from_str(action).ok();
    let effective = match kind {
        BatchKind::File => match parsed {
            Some(a) => format!("{}{}", a.as_str(), FILE_ACTION_SUFFIX),
            None => return Err(ValidationError::UnsupportedFileAction(action.to_string())),
        },
        BatchKind::Plain => match parsed {
            Some(a @ (Action::Process | Action::Skip)) => a.as_str().to_string(),
            _ => return Err(ValidationError::InvalidAction(action.to_string())),
        },
    };

    let data = records
        .iter()
        .map(|r| Value::Object(r.clone()).to_string())
        .collect();

    Ok(FormattedBatch {
        data,
        action: effective,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain_record(timestamp: u64, value: f64) -> Record {
        json!({ "timestamp": timestamp, "value": value })
            .as_object()
            .unwrap()
            .clone()
    }

    fn file_record(filename: &str) -> Record {
        json!({ "base64": "aGVsbG8=", "filename": filename })
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_plain_batch_passes_action_through() {
        let records = vec![plain_record(100, 1.0), plain_record(200, 2.0)];

        for action in ["process", "skip"] {
            let batch = classify_and_format(&records, action).unwrap();
            assert_eq!(batch.action, action);
            assert_eq!(batch.kind, BatchKind::Plain);
            assert_eq!(batch.data.len(), 2);
        }
    }

    #[test]
    fn test_plain_batch_preserves_order() {
        let records: Vec<Record> = (0..5u64).map(|i| plain_record(i, i as f64)).collect();
        let batch = classify_and_format(&records, "process").unwrap();

        for (i, serialized) in batch.data.iter().enumerate() {
            let parsed: Value = serde_json::from_str(serialized).unwrap();
            assert_eq!(parsed["timestamp"], json!(i));
        }
    }

    #[test]
    fn test_file_batch_gets_file_suffix() {
        let records = vec![file_record("a.pdf"), file_record("b.pdf")];

        for (action, expected) in [
            ("process", "process_files"),
            ("skip", "skip_files"),
            ("store", "store_files"),
        ] {
            let batch = classify_and_format(&records, action).unwrap();
            assert_eq!(batch.action, expected);
            assert_eq!(batch.kind, BatchKind::File);
        }
    }

    #[test]
    fn test_store_rejected_for_plain_batch() {
        let records = vec![plain_record(100, 1.0)];
        assert_eq!(
            classify_and_format(&records, "store"),
            Err(ValidationError::InvalidAction("store".to_string()))
        );
    }

    #[test]
    fn test_unknown_action_rejected_per_kind() {
        let plain = vec![plain_record(100, 1.0)];
        assert_eq!(
            classify_and_format(&plain, "archive"),
            Err(ValidationError::InvalidAction("archive".to_string()))
        );

        let files = vec![file_record("a.pdf")];
        assert_eq!(
            classify_and_format(&files, "archive"),
            Err(ValidationError::UnsupportedFileAction("archive".to_string()))
        );
    }

    #[test]
    fn test_mixed_payload_rejected_regardless_of_action() {
        let records = vec![file_record("a.pdf"), plain_record(100, 1.0)];

        for action in ["process", "store", "bogus"] {
            assert_eq!(
                classify_and_format(&records, action),
                Err(ValidationError::Base64Inconsistent)
            );
        }
    }

    #[test]
    fn test_file_record_without_filename_rejected() {
        let complete = file_record("a.pdf");
        let mut missing = complete.clone();
        missing.remove(FILENAME_KEY);

        assert_eq!(
            classify_and_format(&[complete, missing], "process"),
            Err(ValidationError::MissingFilename)
        );
    }

    #[test]
    fn test_empty_batch_rejected() {
        for action in ["process", "skip", "store", "bogus"] {
            assert_eq!(
                classify_and_format(&[], action),
                Err(ValidationError::NoData)
            );
        }
    }

    #[test]
    fn test_serialization_round_trips() {
        let record = json!({
            "timestamp": 1700000000u64,
            "value": 42.5,
            "labels": { "site": "north", "unit": 7 },
            "tags": ["raw", "hourly"],
        })
        .as_object()
        .unwrap()
        .clone();

        let batch = classify_and_format(std::slice::from_ref(&record), "process").unwrap();
        let restored: Record = serde_json::from_str(&batch.data[0]).unwrap();
        assert_eq!(restored, record);
    }
}
