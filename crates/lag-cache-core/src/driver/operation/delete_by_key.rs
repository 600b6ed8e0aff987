use super::Operation;
use crate::Key;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteByKey {
    /// Which table to delete from
    pub table: String,

    /// Which key to delete
    pub key: Key,
}

impl From<DeleteByKey> for Operation {
    fn from(value: DeleteByKey) -> Self {
        Self::DeleteByKey(value)
    }
}
