use super::Error;

/// Error when a construction parameter is missing, empty, or unusable.
#[derive(Debug)]
pub(super) struct ValidationError {
    parameter: Box<str>,
    reason: Option<Box<str>>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.reason {
            None => write!(
                f,
                "validation failed: missing required parameter `{}`",
                self.parameter
            ),
            Some(reason) => write!(
                f,
                "validation failed: invalid parameter `{}`: {reason}",
                self.parameter
            ),
        }
    }
}

impl Error {
    /// Creates a validation error for a missing or empty parameter.
    pub fn validation_missing(parameter: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            parameter: parameter.into().into(),
            reason: None,
        }))
    }

    /// Creates a validation error for a parameter that is present but unusable.
    pub fn validation_invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            parameter: parameter.into().into(),
            reason: Some(reason.into().into()),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
