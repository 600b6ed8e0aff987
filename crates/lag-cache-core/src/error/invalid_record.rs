use super::Error;

/// Error when a stored attribute does not have the expected shape.
#[derive(Debug)]
pub(super) struct InvalidRecordError {
    attribute: Box<str>,
    expected: &'static str,
}

impl std::error::Error for InvalidRecordError {}

impl core::fmt::Display for InvalidRecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid record: attribute `{}` is not a {}",
            self.attribute, self.expected
        )
    }
}

impl Error {
    /// Creates an invalid-record error for `attribute`.
    pub fn invalid_record(attribute: impl Into<String>, expected: &'static str) -> Error {
        Error::from(super::ErrorKind::InvalidRecord(InvalidRecordError {
            attribute: attribute.into().into(),
            expected,
        }))
    }

    /// Returns `true` if this error is an invalid-record error.
    pub fn is_invalid_record(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidRecord(_)))
    }
}
