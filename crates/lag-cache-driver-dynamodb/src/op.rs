mod batch_get_by_key;
mod delete_by_key;
mod get_by_key;
mod put;

use super::{ddb_key, item_to_record, record_to_item, DynamoDb};
use lag_cache_core::{driver::operation, Result};
