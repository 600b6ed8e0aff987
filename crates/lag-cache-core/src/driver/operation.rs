mod batch_get_by_key;
pub use batch_get_by_key::BatchGetByKey;

mod delete_by_key;
pub use delete_by_key::DeleteByKey;

mod get_by_key;
pub use get_by_key::GetByKey;

mod put;
pub use put::Put;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Get one record by its primary key
    GetByKey(GetByKey),

    /// Get up to `MAX_BATCH_GET_KEYS` records by primary key
    BatchGetByKey(BatchGetByKey),

    /// Create or overwrite a record
    Put(Put),

    /// Delete a record by its primary key
    DeleteByKey(DeleteByKey),
}

impl Operation {
    /// Name of the table the operation targets.
    pub fn table(&self) -> &str {
        match self {
            Self::GetByKey(op) => &op.table,
            Self::BatchGetByKey(op) => &op.table,
            Self::Put(op) => &op.table,
            Self::DeleteByKey(op) => &op.table,
        }
    }

    pub fn is_get_by_key(&self) -> bool {
        matches!(self, Self::GetByKey(_))
    }

    pub fn is_batch_get_by_key(&self) -> bool {
        matches!(self, Self::BatchGetByKey(_))
    }

    pub fn is_put(&self) -> bool {
        matches!(self, Self::Put(_))
    }

    pub fn is_delete_by_key(&self) -> bool {
        matches!(self, Self::DeleteByKey(_))
    }
}
