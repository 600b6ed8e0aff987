use crate::{Key, Record, Result, Table};

use futures::future::join_all;

/// Largest number of keys sent in one batch-get.
pub const BATCH_GET_LIMIT: usize = lag_cache_core::driver::MAX_BATCH_GET_KEYS;

/// Fetches the records for `ids` from `table`, one batch-get per chunk of
/// [`BATCH_GET_LIMIT`] ids.
///
/// All chunk requests are in flight at once and the call waits for every
/// one of them, including the ones still running after another chunk has
/// failed. Any failing chunk fails the whole hydration. The
/// returned records are in no particular order relative to `ids`, and ids
/// with no stored record are simply absent.
///
/// No table, or no ids, means nothing to hydrate: the result is empty and
/// the store is never called.
pub async fn hydrate(
    ids: &[String],
    table: Option<&Table>,
    key_attribute: &str,
) -> Result<Vec<Record>> {
    let Some(table) = table else {
        return Ok(vec![]);
    };

    if ids.is_empty() {
        return Ok(vec![]);
    }

    let chunks = ids.chunks(BATCH_GET_LIMIT).map(|chunk| {
        let keys = chunk
            .iter()
            .map(|id| Key::new(key_attribute, id.as_str()))
            .collect::<Vec<_>>();

        table.batch_get(keys)
    });

    tracing::debug!(
        table = table.name(),
        ids = ids.len(),
        chunks = ids.len().div_ceil(BATCH_GET_LIMIT),
        "hydrate"
    );

    let mut records = vec![];
    for chunk in join_all(chunks).await {
        records.extend(chunk?);
    }

    Ok(records)
}
