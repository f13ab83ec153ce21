/// Errors raised by the fallible matrix constructors
use std::fmt;

/// Reasons a view or projection matrix could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A vector that must be normalized (or a matrix that must be inverted)
    /// has zero length along some axis.
    DegenerateInput { what: &'static str },
    /// A projection parameter is outside its valid range.
    InvalidProjection {
        parameter: &'static str,
        value: f32,
        reason: &'static str,
    },
}

impl TransformError {
    pub(crate) fn degenerate(what: &'static str) -> Self {
        tracing::debug!(what, "degenerate transform input");
        Self::DegenerateInput { what }
    }

    pub(crate) fn projection(parameter: &'static str, value: f32, reason: &'static str) -> Self {
        tracing::debug!(parameter, value, reason, "invalid projection parameter");
        Self::InvalidProjection {
            parameter,
            value,
            reason,
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInput { what } => write!(f, "degenerate input: {what}"),
            Self::InvalidProjection {
                parameter,
                value,
                reason,
            } => write!(f, "invalid projection parameter {parameter} = {value}: {reason}"),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<TransformError> for std::io::Error {
    fn from(err: TransformError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TransformError::degenerate("eye and target coincide");
        assert_eq!(err.to_string(), "degenerate input: eye and target coincide");

        let err = TransformError::projection("near", 0.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid projection parameter near = 0: must be positive"
        );
    }

    #[test]
    fn test_into_io_error() {
        let err: std::io::Error = TransformError::degenerate("zero scale").into();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
