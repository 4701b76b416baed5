use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("Invalid predicate for {parameter}: {reason}")]
    InvalidPredicateKind { parameter: String, reason: String },
    #[error("Invalid token {token:?} for {parameter} (allowed {vocabulary} values: {allowed})")]
    InvalidToken {
        parameter: String,
        vocabulary: &'static str,
        token: String,
        allowed: String,
    },
    #[error("Unit mismatch for {parameter}: expected {expected}, found {found}")]
    UnitMismatch {
        parameter: String,
        expected: String,
        found: String,
    },
    #[error("Duplicate parameter in registry: {0}")]
    DuplicateParameter(String),
    #[error("Invalid unit {unit:?}: {reason}")]
    InvalidUnit { unit: String, reason: String },
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        col: Option<usize>,
    },
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {message}")]
    Io { kind: std::io::ErrorKind, message: String },
    #[error("Malformed input: {0}")]
    Data(String),
}

impl QueryError {
    /// True for the errors a caller can cause by composing a bad query.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownParameter(_)
                | Self::InvalidPredicateKind { .. }
                | Self::InvalidToken { .. }
                | Self::UnitMismatch { .. }
                | Self::Parse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

// Helper conversions
impl From<config::ConfigError> for QueryError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for QueryError {
    fn from(e: std::io::Error) -> Self { Self::Io { kind: e.kind(), message: e.to_string() } }
}
impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self { Self::Data(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_keep_their_kind() {
        let e: QueryError = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert!(matches!(e, QueryError::Io { kind: io::ErrorKind::BrokenPipe, .. }));
        assert!(!e.is_query_error());
    }
}
