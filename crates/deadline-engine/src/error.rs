//! Error types for deadline-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError {
    /// An open window whose closing time is not strictly after its opening time.
    #[error("Invalid working window: {0}")]
    InvalidWindow(String),

    /// A date, time, or date-time string that does not match its format.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The rollover advanced this many calendar days without finishing.
    #[error("Processing limit exceeded: unable to finish within {0} days")]
    ProcessingLimitExceeded(u32),

    /// A date or date-time past the representable calendar range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    /// A malformed calendar description.
    #[error("Invalid calendar description: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DeadlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DeadlineError::InvalidWindow("closing 08:00 is not after opening 20:00".into());
        assert_eq!(
            err.to_string(),
            "Invalid working window: closing 08:00 is not after opening 20:00"
        );

        let err = DeadlineError::ProcessingLimitExceeded(365);
        assert_eq!(
            err.to_string(),
            "Processing limit exceeded: unable to finish within 365 days"
        );
    }
}
