pub mod driver;
pub use driver::Driver;

mod error;
pub use error::Error;

pub mod record;
pub use record::{Key, Record, Value};

/// A Result type alias that uses lag-cache's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
