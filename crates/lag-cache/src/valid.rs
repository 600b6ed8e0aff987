use crate::{Record, Result, Table};

/// Returns `true` if `record` has not expired as of `now`.
///
/// A record without a numeric TTL attribute counts as expired.
pub fn is_valid(record: &Record, expiry_attribute: &str, now: i64) -> bool {
    record
        .get_i64(expiry_attribute)
        .is_some_and(|expiry| expiry >= now)
}

/// Fetches a record, treating an expired record as absent.
///
/// Expired records are filtered, never deleted: they stay in the store
/// until a TTL sweep or an explicit delete removes them.
pub async fn get_valid(
    table: &Table,
    id: &str,
    expiry_attribute: &str,
    now: i64,
) -> Result<Option<Record>> {
    let Some(record) = table.get(id).await? else {
        return Ok(None);
    };

    if is_valid(&record, expiry_attribute, now) {
        Ok(Some(record))
    } else {
        tracing::debug!(table = table.name(), id, "record expired");
        Ok(None)
    }
}
