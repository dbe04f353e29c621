//! Terminal publish statuses

use crate::record::ValidationError;

/// Terminal outcome of one publish call.
///
/// Every `batch` call resolves to exactly one of these; no error escapes the
/// publisher as a fault. `Delivered` carries the middleware's own status
/// string, uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    /// Middleware accepted the batch.
    Delivered(String),
    /// Indicator was unset or empty at call time.
    NoIndicator,
    /// The batch was empty.
    NoData,
    /// Some but not all records carried a base64 payload.
    Base64Inconsistent,
    /// A file record lacked a filename.
    MissingFilename,
    /// File batch with an action outside process/skip/store.
    UnsupportedFileAction,
    /// Plain batch with an action outside process/skip.
    InvalidAction,
    /// Non-transient transport fault.
    Internal,
    /// Retries and reconnect cycles both exhausted.
    Failed,
}

impl PublishStatus {
    /// The status code string callers log and branch on.
    pub fn as_code(&self) -> &str {
        match self {
            PublishStatus::Delivered(status) => status,
            PublishStatus::NoIndicator => "NO_INDICATOR_ERROR",
            PublishStatus::NoData => "NO_DATA_ERROR",
            PublishStatus::Base64Inconsistent => "BASE64_INCONSISTENT_ERROR",
            PublishStatus::MissingFilename => "MISSING_FILENAME_ERROR",
            PublishStatus::UnsupportedFileAction => "UNSUPPORTED_FILE_ACTION_ERROR",
            PublishStatus::InvalidAction => "INVALID_ACTION_ERROR",
            PublishStatus::Internal => "INTERNAL_ERROR",
            PublishStatus::Failed => "FAILED",
        }
    }

    /// Whether the middleware accepted the batch.
    pub fn is_delivered(&self) -> bool {
        matches!(self, PublishStatus::Delivered(_))
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl From<ValidationError> for PublishStatus {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NoData => PublishStatus::NoData,
            ValidationError::Base64Inconsistent => PublishStatus::Base64Inconsistent,
            ValidationError::MissingFilename => PublishStatus::MissingFilename,
            ValidationError::UnsupportedFileAction(_) => PublishStatus::UnsupportedFileAction,
            ValidationError::InvalidAction(_) => PublishStatus::InvalidAction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PublishStatus::NoIndicator.as_code(), "NO_INDICATOR_ERROR");
        assert_eq!(PublishStatus::Internal.as_code(), "INTERNAL_ERROR");
        assert_eq!(PublishStatus::Failed.as_code(), "FAILED");
        assert_eq!(
            PublishStatus::Delivered("SUCCESS".to_string()).as_code(),
            "SUCCESS"
        );
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(
            format!("{}", PublishStatus::Base64Inconsistent),
            "BASE64_INCONSISTENT_ERROR"
        );
    }

    #[test]
    fn test_validation_error_mapping() {
        assert_eq!(
            PublishStatus::from(ValidationError::NoData),
            PublishStatus::NoData
        );
        assert_eq!(
            PublishStatus::from(ValidationError::UnsupportedFileAction("x".to_string())),
            PublishStatus::UnsupportedFileAction
        );
        assert!(!PublishStatus::NoData.is_delivered());
        assert!(PublishStatus::Delivered("OK".to_string()).is_delivered());
    }
}
