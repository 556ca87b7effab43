use std::error::Error as StdError;

/// Boxed cause carried by [`CoreError::Internal`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of a [`CoreError`], independent of its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Sentinel: no record matches the given identifier.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Malformed or missing input, detected before storage is touched.
    #[error("{0}")]
    BadRequest(String),

    /// Any other failure. `context` is safe to show to clients, `source`
    /// keeps the original error for logs and programmatic inspection.
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: Option<BoxError>,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        CoreError::BadRequest(message.into())
    }

    /// An internal error caused by `source`.
    pub fn internal(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CoreError::Internal {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::BadRequest(_) => ErrorKind::BadRequest,
            CoreError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Wrap an unclassified error with a descriptive message.
    ///
    /// Not-found and bad-request errors are returned unchanged so callers
    /// can still match on them. Internal errors become the `source` of a new
    /// internal error whose message is `context`.
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            CoreError::Internal { .. } => CoreError::Internal {
                context: context.into(),
                source: Some(Box::new(self)),
            },
            classified => classified,
        }
    }

    /// Whether an error of type `E` appears anywhere in the `source()` chain,
    /// including `self`.
    pub fn chain_contains<E: StdError + 'static>(&self) -> bool {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(err) = current {
            if err.is::<E>() {
                return true;
            }
            current = err.source();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug)]
    struct DriverError;

    impl fmt::Display for DriverError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset by peer")
        }
    }

    impl StdError for DriverError {}

    #[test]
    fn not_found_passes_through_context_unchanged() {
        let err = CoreError::not_found("Note", "abc").context("failed to find note by uuid");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Note with id abc not found");
    }

    #[test]
    fn bad_request_passes_through_context_unchanged() {
        let err = CoreError::bad_request("nothing to update").context("failed to update note");
        assert_matches!(err, CoreError::BadRequest(ref msg) if msg == "nothing to update");
    }

    #[test]
    fn internal_error_is_wrapped_with_context() {
        let err = CoreError::internal("database query failed", DriverError)
            .context("failed to create note");

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "failed to create note");

        let inner = err.source().expect("wrapped error keeps its source");
        assert_eq!(inner.to_string(), "database query failed");
    }

    #[test]
    fn chain_contains_finds_the_original_cause() {
        let err = CoreError::internal("database query failed", DriverError)
            .context("failed to delete note");

        assert!(err.chain_contains::<DriverError>());
        assert!(err.chain_contains::<CoreError>());
        assert!(!err.chain_contains::<std::io::Error>());
    }

    #[test]
    fn kind_classifies_each_variant() {
        assert_eq!(CoreError::not_found("Tag", "1").kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::bad_request("x").kind(), ErrorKind::BadRequest);
        assert_eq!(
            CoreError::internal("x", DriverError).kind(),
            ErrorKind::Internal
        );
    }
}
