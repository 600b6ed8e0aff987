mod response;
pub use response::Response;

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::fmt::Debug;

/// Maximum number of keys a single batch-get may carry.
///
/// Drivers reject larger batches. Callers chunk their key lists to stay
/// within this limit.
pub const MAX_BATCH_GET_KEYS: usize = 25;

/// A key-value store backend.
///
/// Drivers are shared between every table handle, so all methods take
/// `&self`. No locking or transaction wraps an operation: the last writer
/// wins.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a store operation
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
