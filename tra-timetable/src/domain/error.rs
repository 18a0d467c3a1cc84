//! Domain error types.
//!
//! These errors represent invalid query input. They are distinct from
//! API/IO errors.

use super::InvalidStationId;

/// Domain-level errors for validating query input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Station ID could not be parsed
    #[error(transparent)]
    StationId(#[from] InvalidStationId),

    /// Search date is not `YYYY-MM-DD`
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Start time is not `HH:MM`
    #[error("invalid start time: {0}")]
    InvalidStartTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidDate("2025-13-01".into());
        assert_eq!(err.to_string(), "invalid date: 2025-13-01");

        let err = DomainError::InvalidStartTime("8am".into());
        assert_eq!(err.to_string(), "invalid start time: 8am");

        let err: DomainError = StationId::parse("").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid station ID: must not be empty");
    }
}
