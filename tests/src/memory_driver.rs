use indexmap::IndexMap;
use lag_cache_core::{
    async_trait,
    driver::{Driver, Operation, Response, MAX_BATCH_GET_KEYS},
    Key, Record, Result,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

type Tables = HashMap<String, IndexMap<String, Record>>;

/// An in-process store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `record` straight into `table`, bypassing the cache layer.
    pub fn insert(&self, table: &str, key_attribute: &str, record: Record) {
        let id = record
            .get_str(key_attribute)
            .expect("record must carry its primary key")
            .to_string();

        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .insert(id, record);
    }

    /// Reads a record straight from `table`.
    pub fn get(&self, table: &str, id: &str) -> Option<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .and_then(|records| records.get(id))
            .cloned()
    }

    /// Number of records stored in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map_or(0, IndexMap::len)
    }

    fn lookup(tables: &Tables, table: &str, key: &Key) -> Option<Record> {
        tables
            .get(table)
            .and_then(|records| records.get(&key.value))
            .filter(|record| record.get_str(&key.attribute) == Some(key.value.as_str()))
            .cloned()
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn exec(&self, op: Operation) -> Result<Response> {
        let mut tables = self.tables.lock().unwrap();

        match op {
            Operation::GetByKey(op) => Ok(Response::Record(Self::lookup(
                &tables, &op.table, &op.key,
            ))),
            Operation::BatchGetByKey(op) => {
                if op.keys.len() > MAX_BATCH_GET_KEYS {
                    lag_cache_core::bail!(
                        "batch get supports at most {MAX_BATCH_GET_KEYS} keys; requested={}",
                        op.keys.len()
                    );
                }

                // Batch-gets promise no ordering: answer in reverse
                let records = op
                    .keys
                    .iter()
                    .rev()
                    .filter_map(|key| Self::lookup(&tables, &op.table, key))
                    .collect();

                Ok(Response::Records(records))
            }
            Operation::Put(op) => {
                if op.record.get_str(&op.key.attribute) != Some(op.key.value.as_str()) {
                    lag_cache_core::bail!("record does not carry its key; key={}", op.key);
                }

                tables
                    .entry(op.table)
                    .or_default()
                    .insert(op.key.value, op.record);
                Ok(Response::count(1))
            }
            Operation::DeleteByKey(op) => {
                let removed = tables
                    .get_mut(&op.table)
                    .and_then(|records| records.shift_remove(&op.key.value));

                Ok(Response::count(removed.map_or(0, |_| 1)))
            }
        }
    }
}
