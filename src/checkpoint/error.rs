//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a store snapshot
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding the snapshot as JSON or bincode failed
    #[error("Snapshot encoding failed: {0}")]
    SerializationFailed(String),

    /// The bytes or text are not a snapshot in either format
    #[error("Snapshot decoding failed: {0}")]
    DeserializationFailed(String),

    /// The snapshot was written by a different checkpoint format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot parsed but describes a store the engine could never
    /// have produced. Every problem found is listed.
    #[error("Checkpoint validation failed: {}", .problems.join("; "))]
    ValidationFailed { problems: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let version = CheckpointError::UnsupportedVersion {
            found: 3,
            supported: 1,
        };
        assert_eq!(
            version.to_string(),
            "Unsupported checkpoint version 3, supported: 1"
        );

        let invalid = CheckpointError::ValidationFailed {
            problems: vec!["ride 0".to_string(), "ride 9".to_string()],
        };
        assert_eq!(
            invalid.to_string(),
            "Checkpoint validation failed: ride 0; ride 9"
        );
    }
}
