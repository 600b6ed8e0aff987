use super::Error;

/// Error when `save` is called on a record that was never hydrated.
///
/// This signals caller misuse, not a transient condition. Retrying will not help.
#[derive(Debug)]
pub(super) struct NotSaveableError {
    context: Box<str>,
}

impl std::error::Error for NotSaveableError {}

impl core::fmt::Display for NotSaveableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record is not saveable: {}", self.context)
    }
}

impl Error {
    /// Creates a not-saveable error.
    pub fn not_saveable(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotSaveable(NotSaveableError {
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is a not-saveable error.
    pub fn is_not_saveable(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NotSaveable(_)))
    }
}
