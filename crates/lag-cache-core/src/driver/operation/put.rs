use super::Operation;
use crate::{Key, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Put {
    /// Which table to write to
    pub table: String,

    /// Primary key of `record`
    pub key: Key,

    /// The full record, primary key included. Overwrites any existing record
    /// with the same key.
    pub record: Record,
}

impl From<Put> for Operation {
    fn from(value: Put) -> Self {
        Self::Put(value)
    }
}
