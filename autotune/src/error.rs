//! Error types for allocation and config generation.

/// Result type for autotune operations
pub type AutotuneResult<T> = Result<T, AutotuneError>;

/// Error type for autotune operations
#[derive(Debug, thiserror::Error)]
pub enum AutotuneError {
    #[error("Input validation error: {0}")]
    InputValidation(String),

    #[error("Coverage error: {unconfirmed} of {total} channels could not be confirmed")]
    Coverage { unconfirmed: usize, total: usize },

    #[error("Site data error: {0}")]
    SiteData(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AutotuneError {
    /// Whether the error came from the allocation core rather than the
    /// surrounding directory/config layers.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            AutotuneError::InputValidation(_) | AutotuneError::Coverage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_message_names_channel_count() {
        let err = AutotuneError::Coverage {
            unconfirmed: 3,
            total: 12,
        };
        assert_eq!(
            err.to_string(),
            "Coverage error: 3 of 12 channels could not be confirmed"
        );
        assert!(err.is_allocation_failure());
    }

    #[test]
    fn test_io_error_is_not_allocation_failure() {
        let err: AutotuneError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_allocation_failure());
    }
}
