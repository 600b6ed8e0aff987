use super::{ddb_key, operation, DynamoDb, Result};
use aws_sdk_dynamodb::types::ReturnValue;
use lag_cache_core::driver::Response;

impl DynamoDb {
    pub(crate) async fn exec_delete_by_key(&self, op: operation::DeleteByKey) -> Result<Response> {
        tracing::trace!(table = %op.table, key = %op.key, "delete_item");

        let res = self
            .client
            .delete_item()
            .table_name(&op.table)
            .set_key(Some(ddb_key(&op.key)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(lag_cache_core::Error::driver)?;

        Ok(Response::count(if res.attributes.is_some() { 1 } else { 0 }))
    }
}
