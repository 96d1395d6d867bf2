use thiserror::Error;

/// Main error type for Kinship
#[derive(Error, Debug)]
pub enum KinshipError {
    /// A family unit references an individual that was never loaded
    #[error("Referential integrity error: family {family_id} references unknown individual {individual_id}")]
    ReferentialIntegrity {
        family_id: String,
        individual_id: String,
    },

    /// Structurally invalid family data detected at load time
    #[error("Invalid family data: {0}")]
    InvalidFamily(String),

    /// Individual not found
    #[error("Individual not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Corrupt parent graph detected while traversing (cycles, runaway depth)
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenient Result type using KinshipError
pub type Result<T> = std::result::Result<T, KinshipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KinshipError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_referential_integrity_names_both_ids() {
        let err = KinshipError::ReferentialIntegrity {
            family_id: "F1".to_string(),
            individual_id: "I404".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("F1"));
        assert!(msg.contains("I404"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let kinship_err: KinshipError = io_err.into();
        assert!(matches!(kinship_err, KinshipError::Io(_)));
    }
}
