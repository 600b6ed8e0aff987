use super::{ddb_key, item_to_record, operation, DynamoDb, Result};
use lag_cache_core::driver::Response;

impl DynamoDb {
    pub(crate) async fn exec_get_by_key(&self, op: operation::GetByKey) -> Result<Response> {
        tracing::trace!(table = %op.table, key = %op.key, "get_item");

        let res = self
            .client
            .get_item()
            .table_name(&op.table)
            .set_key(Some(ddb_key(&op.key)))
            .send()
            .await
            .map_err(lag_cache_core::Error::driver)?;

        match res.item {
            Some(item) => Ok(Response::Record(Some(item_to_record(item)?))),
            None => Ok(Response::Record(None)),
        }
    }
}
