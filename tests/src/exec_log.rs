use crate::logging_driver::DriverOp;
use lag_cache_core::{
    driver::{Operation, Response},
    Result,
};
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    pub fn count_gets(&self) -> usize {
        self.count(Operation::is_get_by_key)
    }

    pub fn count_batch_gets(&self) -> usize {
        self.count(Operation::is_batch_get_by_key)
    }

    pub fn count_puts(&self) -> usize {
        self.count(Operation::is_put)
    }

    pub fn count_deletes(&self) -> usize {
        self.count(Operation::is_delete_by_key)
    }

    /// Key counts of every logged batch-get, sorted ascending
    pub fn batch_get_sizes(&self) -> Vec<usize> {
        let mut sizes = self
            .ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match &op.operation {
                Operation::BatchGetByKey(batch) => Some(batch.keys.len()),
                _ => None,
            })
            .collect::<Vec<_>>();
        sizes.sort_unstable();
        sizes
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    /// Returns None if the log is empty
    pub fn pop(&mut self) -> Option<(Operation, Result<Response>)> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            let driver_op = ops.remove(0);
            Some((driver_op.operation, driver_op.response))
        }
    }

    /// Get access to all operations for custom assertions
    /// This is an escape hatch for complex assertions
    pub fn with_ops<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[DriverOp]) -> R,
    {
        let ops = self.ops.lock().unwrap();
        f(&ops)
    }
}
