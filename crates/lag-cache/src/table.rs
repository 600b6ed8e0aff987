use crate::{schema::Schema, Error, Key, Record, Result, Value};

use lag_cache_core::driver::{operation, Driver};

use std::sync::Arc;

/// A handle to one store table.
///
/// Cloning is cheap; every clone shares the same driver. Key values pass
/// through [`Schema::normalize_key`] before any read or write.
#[derive(Debug, Clone)]
pub struct Table {
    name: Arc<str>,
    schema: &'static Schema,
    driver: Arc<dyn Driver>,
}

impl Table {
    pub fn new(driver: Arc<dyn Driver>, name: &str, schema: &'static Schema) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::validation_missing("table name"));
        }

        Ok(Self {
            name: name.into(),
            schema,
            driver,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Builds the primary key for `id`.
    pub fn key(&self, id: &str) -> Key {
        Key::new(self.schema.primary_key, self.schema.normalize_key(id))
    }

    /// Fetches one record. A missing record is `Ok(None)`.
    pub async fn get(&self, id: &str) -> Result<Option<Record>> {
        let key = self.key(id);
        tracing::debug!(table = %self.name, %key, "get");

        self.driver
            .exec(
                operation::GetByKey {
                    table: self.name.to_string(),
                    key,
                }
                .into(),
            )
            .await?
            .into_record()
    }

    /// Creates or overwrites a record.
    pub async fn put(&self, mut record: Record) -> Result<()> {
        let primary_key = self.schema.primary_key;

        let Some(id) = record.get_str(primary_key) else {
            return Err(Error::validation_missing(primary_key));
        };

        let key = self.key(id);
        tracing::debug!(table = %self.name, %key, attributes = record.len(), "put");
        record.insert(primary_key, Value::from(key.value.clone()));

        self.driver
            .exec(
                operation::Put {
                    table: self.name.to_string(),
                    key,
                    record,
                }
                .into(),
            )
            .await?;

        Ok(())
    }

    /// Deletes a record, returning how many records were removed.
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let key = self.key(id);
        tracing::debug!(table = %self.name, %key, "delete");

        self.driver
            .exec(
                operation::DeleteByKey {
                    table: self.name.to_string(),
                    key,
                }
                .into(),
            )
            .await?
            .into_count()
    }

    /// Issues a single batch-get. `keys` must respect the driver's batch limit;
    /// use [`hydrate`](crate::hydrate::hydrate) to fetch arbitrary id lists.
    pub async fn batch_get(&self, keys: Vec<Key>) -> Result<Vec<Record>> {
        tracing::debug!(table = %self.name, keys = keys.len(), "batch_get");

        let keys = keys
            .into_iter()
            .map(|key| {
                if key.attribute == self.schema.primary_key {
                    Key::new(key.attribute, self.schema.normalize_key(&key.value))
                } else {
                    key
                }
            })
            .collect();

        self.driver
            .exec(
                operation::BatchGetByKey {
                    table: self.name.to_string(),
                    keys,
                }
                .into(),
            )
            .await?
            .into_records()
    }
}
