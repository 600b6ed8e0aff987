//! Cached library records (loans, requests, fees, users) over a key-value
//! store.
//!
//! Every record kind shares one lifecycle: populate through a field
//! whitelist, stamp a TTL, save, and read back through [`valid::get_valid`],
//! which treats an expired record as absent. A [`User`] additionally tracks
//! the ids of its loans, requests and fees, and can hydrate them with
//! chunked batch-gets.

pub mod cache;
pub use cache::{Cache, CacheConfig};

pub mod entity;
pub use entity::{Entity, State};

pub mod expiry;

pub mod hydrate;

pub mod id_set;

pub mod projector;

pub mod schema;
pub use schema::{EntityKind, Schema};

mod table;
pub use table::Table;

mod user;
pub use user::User;

pub mod valid;

pub use lag_cache_core::{driver, Error, Key, Record, Result, Value};
