//! Error types for the FitQuest engines

use thiserror::Error;

/// Engine-level error types
///
/// Validation errors are raised synchronously at the engine boundary and
/// surfaced to the caller untransformed. Plan gaps (unresolved meal slots)
/// and truncated projections are flags on the returned data, not errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidProfile("weight_kg: must be at least 20 kg".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid profile: weight_kg: must be at least 20 kg"
        );

        let err = EngineError::InvalidDate("2024-13-01".to_string());
        assert_eq!(err.to_string(), "Invalid date: 2024-13-01");
    }
}
