use super::{operation, record_to_item, DynamoDb, Result};
use lag_cache_core::driver::Response;

impl DynamoDb {
    pub(crate) async fn exec_put(&self, op: operation::Put) -> Result<Response> {
        tracing::trace!(table = %op.table, key = %op.key, attributes = op.record.len(), "put_item");

        self.client
            .put_item()
            .table_name(&op.table)
            .set_item(Some(record_to_item(op.record)))
            .send()
            .await
            .map_err(lag_cache_core::Error::driver)?;

        Ok(Response::count(1))
    }
}
