use super::Operation;
use crate::Key;

#[derive(Debug, Clone, PartialEq)]
pub struct GetByKey {
    /// Which table to get from
    pub table: String,

    /// Which key to fetch
    pub key: Key,
}

impl From<GetByKey> for Operation {
    fn from(value: GetByKey) -> Self {
        Self::GetByKey(value)
    }
}
