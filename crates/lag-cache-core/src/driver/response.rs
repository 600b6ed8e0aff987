use crate::{Record, Result};

/// The result of executing an [`Operation`](super::Operation).
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A single lookup, `None` when the key does not exist
    Record(Option<Record>),

    /// Records returned by a batch lookup, in no particular order
    Records(Vec<Record>),

    /// Number of records written or removed
    Count(u64),
}

impl Response {
    pub fn empty() -> Self {
        Self::Records(vec![])
    }

    pub fn count(count: u64) -> Self {
        Self::Count(count)
    }

    pub fn into_record(self) -> Result<Option<Record>> {
        match self {
            Self::Record(record) => Ok(record),
            other => Err(crate::err!("expected single record response; actual={other:?}")),
        }
    }

    pub fn into_records(self) -> Result<Vec<Record>> {
        match self {
            Self::Records(records) => Ok(records),
            Self::Record(record) => Ok(record.into_iter().collect()),
            other => Err(crate::err!("expected record list response; actual={other:?}")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            other => Err(crate::err!("expected count response; actual={other:?}")),
        }
    }
}
