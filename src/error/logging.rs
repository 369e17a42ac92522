use thiserror::Error;

/// Ошибки инициализации логирования.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    #[error("global tracing subscriber is already set: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_display() {
        let err = LoggingError::InvalidDirective {
            directive: "topical=[".into(),
            reason: "bad span".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid log filter directive 'topical=[': bad span"
        );
    }
}
