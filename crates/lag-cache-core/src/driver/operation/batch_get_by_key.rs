use super::Operation;
use crate::Key;

#[derive(Debug, Clone, PartialEq)]
pub struct BatchGetByKey {
    /// Which table to get from
    pub table: String,

    /// Which keys to fetch. Never more than `MAX_BATCH_GET_KEYS`.
    pub keys: Vec<Key>,
}

impl From<BatchGetByKey> for Operation {
    fn from(value: BatchGetByKey) -> Self {
        Self::BatchGetByKey(value)
    }
}
