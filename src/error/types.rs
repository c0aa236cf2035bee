use thiserror::Error;

use crate::config::ConfigError;

/// Unified result type for the storage layout crate.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors surfaced by the storage layout engine.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage sets container is not loaded")]
    ContainerMissing,
    #[error("storage screen title is not loaded")]
    TitleMissing,
    #[error("`{0}` is not a recognized storage unit")]
    UnrecognizedTitle(String),
    #[error("malformed storage set at child {header_index}: {reason}")]
    MalformedSet {
        header_index: usize,
        reason: &'static str,
    },
    #[error("config store error: {0}")]
    Config(#[from] ConfigError),
}

impl StorageError {
    /// True for failures that mean "leave the screen alone this time".
    ///
    /// Neither kind is transient: the next host signal simply checks again.
    pub fn skips_pass(&self) -> bool {
        matches!(
            self,
            Self::ContainerMissing
                | Self::TitleMissing
                | Self::UnrecognizedTitle(_)
                | Self::MalformedSet { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_skip_the_pass() {
        assert!(StorageError::ContainerMissing.skips_pass());
        assert!(StorageError::UnrecognizedTitle("Bank".into()).skips_pass());
        assert!(
            StorageError::MalformedSet {
                header_index: 1,
                reason: "header has fewer than three preceding siblings",
            }
            .skips_pass()
        );
    }

    #[test]
    fn store_errors_propagate() {
        let io = std::io::Error::other("disk full");
        let err = StorageError::from(ConfigError::from(io));
        assert!(!err.skips_pass());
    }
}
