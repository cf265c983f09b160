//! Error module
use std::{borrow::Cow, fmt};
use thiserror::Error;

#[derive(Debug, Error)]
/// The error type for SQL generation, translation and save batch validation.
///
/// Broken structural invariants of the expression tree (missing children, argument
/// counts that do not match their nullability flags) are programming errors and panic at
/// construction instead of surfacing here.
pub struct Error {
    kind: ErrorKind,
    original_message: Option<String>,
}

pub struct ErrorBuilder {
    kind: ErrorKind,
    original_message: Option<String>,
}

impl ErrorBuilder {
    pub fn set_original_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.original_message = Some(message.into());
        self
    }

    pub fn build(self) -> Error {
        Error {
            kind: self.kind,
            original_message: self.original_message,
        }
    }
}

impl Error {
    pub fn builder(kind: ErrorKind) -> ErrorBuilder {
        ErrorBuilder {
            kind,
            original_message: None,
        }
    }

    /// An operation the dialect can never perform.
    pub fn not_supported(
        provider: &'static str,
        operation: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::builder(ErrorKind::NotSupported {
            provider,
            operation: operation.into(),
            message: message.into(),
        })
        .build()
    }

    /// No translator in the chain recognized the method.
    pub fn translation_failed(method: impl Into<String>) -> Self {
        Self::builder(ErrorKind::TranslationFailed { method: method.into() }).build()
    }

    pub fn method_not_found(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::builder(ErrorKind::MethodNotFound {
            declaring_type: declaring_type.into(),
            name: name.into(),
        })
        .build()
    }

    /// The executor reported an unexpected number of affected rows.
    pub fn concurrency_conflict(table: impl Into<String>, expected: u64, actual: u64) -> Self {
        Self::builder(ErrorKind::ConcurrencyConflict {
            table: table.into(),
            expected,
            actual,
        })
        .build()
    }

    /// The executor reported a different number of affected row counts than the batch has
    /// result sets.
    pub fn result_set_count_mismatch(expected: usize, actual: usize) -> Self {
        Self::builder(ErrorKind::ResultSetCountMismatch { expected, actual }).build()
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::builder(ErrorKind::InvalidOptions(message.into())).build()
    }

    /// Additional context attached by the component that raised the error, if any.
    pub fn original_message(&self) -> Option<&str> {
        self.original_message.as_deref()
    }

    /// A more specific error type for matching.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self.kind, ErrorKind::ConcurrencyConflict { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)?;

        if let Some(message) = &self.original_message {
            write!(f, " ({message})")?;
        }

        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("{provider}: {operation} is not supported. {message}")]
    NotSupported {
        provider: &'static str,
        operation: Cow<'static, str>,
        message: Cow<'static, str>,
    },

    #[error("The method call '{method}' could not be translated.")]
    TranslationFailed { method: String },

    #[error("No method '{declaring_type}.{name}' with the given parameter types was found.")]
    MethodNotFound { declaring_type: String, name: String },

    #[error(
        "The database operation on '{table}' was expected to affect {expected} row(s), but actually affected {actual} row(s)."
    )]
    ConcurrencyConflict { table: String, expected: u64, actual: u64 },

    #[error("The batch has {expected} result set(s), but {actual} affected row count(s) were reported.")]
    ResultSetCountMismatch { expected: usize, actual: usize },

    #[error("Invalid provider options: {0}")]
    InvalidOptions(String),
}

impl From<Error> for ErrorKind {
    fn from(e: Error) -> Self {
        e.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_supported_names_the_provider_and_operation() {
        let err = Error::not_supported("SQLite", "Sequences", "SQLite does not support sequences.");

        assert_eq!(
            "SQLite: Sequences is not supported. SQLite does not support sequences.",
            err.to_string()
        );
    }

    #[test]
    fn original_message_is_appended_to_display() {
        let mut builder = Error::builder(ErrorKind::InvalidOptions("max_batch_size".into()));
        builder.set_original_message("invalid digit found in string");

        assert_eq!(
            "Invalid provider options: max_batch_size (invalid digit found in string)",
            builder.build().to_string()
        );
    }

    #[test]
    fn concurrency_conflicts_are_distinguishable() {
        let err = Error::concurrency_conflict("Blogs", 1, 0);

        assert!(err.is_concurrency_conflict());
        assert!(!Error::translation_failed("String.Foo()").is_concurrency_conflict());
    }
}
