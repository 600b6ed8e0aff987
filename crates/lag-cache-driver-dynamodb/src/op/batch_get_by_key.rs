use super::{ddb_key, item_to_record, operation, DynamoDb, Result};
use aws_sdk_dynamodb::{operation::batch_get_item::BatchGetItemOutput, types::KeysAndAttributes};
use lag_cache_core::{
    driver::{Response, MAX_BATCH_GET_KEYS},
    Record,
};

impl DynamoDb {
    pub(crate) async fn exec_batch_get_by_key(
        &self,
        op: operation::BatchGetByKey,
    ) -> Result<Response> {
        if op.keys.is_empty() {
            return Ok(Response::empty());
        }

        if op.keys.len() > MAX_BATCH_GET_KEYS {
            lag_cache_core::bail!(
                "batch get supports at most {MAX_BATCH_GET_KEYS} keys; requested={}",
                op.keys.len()
            );
        }

        tracing::trace!(table = %op.table, keys = op.keys.len(), "batch_get_item");

        let keys = op.keys.iter().map(ddb_key).collect::<Vec<_>>();

        let res = self
            .client
            .batch_get_item()
            .request_items(
                op.table.clone(),
                KeysAndAttributes::builder()
                    .set_keys(Some(keys))
                    .build()
                    .map_err(lag_cache_core::Error::driver)?,
            )
            .send()
            .await
            .map_err(lag_cache_core::Error::driver)?;

        let records = batch_get_records(&op.table, op.keys.len(), res)?;

        Ok(Response::Records(records))
    }
}

/// Extracts the records of `table` from a batch-get response.
///
/// DynamoDB may answer part of a batch and hand the rest back as unprocessed
/// keys, typically when throttled. That is reported as a store error so no
/// requested record is silently dropped.
fn batch_get_records(table: &str, requested: usize, res: BatchGetItemOutput) -> Result<Vec<Record>> {
    let unprocessed = res
        .unprocessed_keys
        .as_ref()
        .and_then(|unprocessed| unprocessed.get(table))
        .map(|keys| keys.keys().len())
        .unwrap_or(0);

    if unprocessed > 0 {
        return Err(lag_cache_core::Error::driver(UnprocessedKeys {
            table: table.to_string(),
            unprocessed,
            requested,
        }));
    }

    let Some(mut responses) = res.responses else {
        return Ok(vec![]);
    };
    let Some(items) = responses.remove(table) else {
        return Ok(vec![]);
    };

    items.into_iter().map(item_to_record).collect()
}

#[derive(Debug)]
struct UnprocessedKeys {
    table: String,
    unprocessed: usize,
    requested: usize,
}

impl std::error::Error for UnprocessedKeys {}

impl core::fmt::Display for UnprocessedKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "batch get left {} of {} keys unprocessed; table={}",
            self.unprocessed, self.requested, self.table
        )
    }
}
