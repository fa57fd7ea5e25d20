use std::fmt;

use thiserror::Error;

/// Result alias for employee directory fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of a single `get_employees` call.
///
/// Every transport, status, and body problem is translated into exactly one of
/// these variants. Match on the variant (or on [`FetchError::kind`]); the
/// display text is for humans only.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed")]
    Transport(#[source] reqwest::Error),
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("Invalid response format: expected a list")]
    InvalidFormat {
        #[source]
        source: Option<serde_json::Error>,
    },
    #[error("Invalid employee data format")]
    InvalidRecord(#[source] RecordError),
}

/// Copyable tag identifying which class of failure a [`FetchError`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    TransportFailure,
    UnexpectedStatus,
    InvalidFormat,
    InvalidRecord,
}

impl FetchErrorKind {
    /// Stable machine-readable code, used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            FetchErrorKind::TransportFailure => "TRANSPORT_FAILURE",
            FetchErrorKind::UnexpectedStatus => "UNEXPECTED_STATUS",
            FetchErrorKind::InvalidFormat => "INVALID_FORMAT",
            FetchErrorKind::InvalidRecord => "INVALID_RECORD",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchError {
    /// Which class of failure this is, for branching and log fields.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::TransportFailure,
            FetchError::UnexpectedStatus(_) => FetchErrorKind::UnexpectedStatus,
            FetchError::InvalidFormat { .. } => FetchErrorKind::InvalidFormat,
            FetchError::InvalidRecord(_) => FetchErrorKind::InvalidRecord,
        }
    }

    pub(crate) fn not_a_list() -> Self {
        Self::InvalidFormat { source: None }
    }

    pub(crate) fn malformed_body(err: serde_json::Error) -> Self {
        Self::InvalidFormat { source: Some(err) }
    }
}

impl From<RecordError> for FetchError {
    fn from(value: RecordError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Why a single element of the response array was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record {index} is not an object")]
    NotAnObject { index: usize },
    #[error("record {index} has no `id` field")]
    MissingId { index: usize },
    #[error("record {index} has a non-integer `id`: {value}")]
    InvalidId { index: usize, value: String },
}

impl RecordError {
    pub fn index(&self) -> usize {
        match self {
            RecordError::NotAnObject { index }
            | RecordError::MissingId { index }
            | RecordError::InvalidId { index, .. } => *index,
        }
    }

    pub(crate) fn at(self, index: usize) -> Self {
        match self {
            RecordError::NotAnObject { .. } => RecordError::NotAnObject { index },
            RecordError::MissingId { .. } => RecordError::MissingId { index },
            RecordError::InvalidId { value, .. } => RecordError::InvalidId { index, value },
        }
    }
}

/// Invalid fetcher configuration, reported at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid employees url `{value}`: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme `{0}`; expected http or https")]
    UnsupportedScheme(String),
    #[error("invalid timeout `{0}`; expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn messages_match_the_published_taxonomy() {
        assert_eq!(
            FetchError::UnexpectedStatus(503).to_string(),
            "Unexpected status code: 503"
        );
        assert_eq!(
            FetchError::not_a_list().to_string(),
            "Invalid response format: expected a list"
        );
        let err = FetchError::from(RecordError::MissingId { index: 2 });
        assert_eq!(err.to_string(), "Invalid employee data format");
        assert_eq!(err.kind(), FetchErrorKind::InvalidRecord);
    }

    #[test]
    fn invalid_record_keeps_its_cause() {
        let err = FetchError::from(RecordError::InvalidId {
            index: 1,
            value: "\"abc\"".into(),
        });
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("record 1 has a non-integer `id`: \"abc\"")
        );
    }

    #[test]
    fn malformed_body_is_an_invalid_format_with_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = FetchError::malformed_body(parse_err);
        assert_eq!(err.kind(), FetchErrorKind::InvalidFormat);
        assert!(err.source().is_some());
        assert!(FetchError::not_a_list().source().is_none());
    }

    #[test]
    fn kind_codes_are_stable() {
        assert_eq!(FetchErrorKind::TransportFailure.as_str(), "TRANSPORT_FAILURE");
        assert_eq!(FetchErrorKind::UnexpectedStatus.to_string(), "UNEXPECTED_STATUS");
        assert_eq!(FetchErrorKind::InvalidFormat.as_str(), "INVALID_FORMAT");
        assert_eq!(FetchErrorKind::InvalidRecord.as_str(), "INVALID_RECORD");
    }

    #[test]
    fn record_error_can_be_reindexed() {
        let err = RecordError::MissingId { index: 0 }.at(4);
        assert_eq!(err, RecordError::MissingId { index: 4 });
        assert_eq!(err.index(), 4);
    }
}
