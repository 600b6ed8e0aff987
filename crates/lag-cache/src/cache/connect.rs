use crate::Result;

use lag_cache_core::driver::Driver;

use std::sync::Arc;
use url::Url;

/// Opens a driver for the store at `url`, dispatching on the URL scheme.
pub async fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let url = Url::parse(url).map_err(lag_cache_core::Error::driver)?;

    match url.scheme() {
        "dynamodb" => connect_dynamodb(&url).await,
        scheme => Err(lag_cache_core::err!(
            "unsupported store; scheme={scheme}; url={url}"
        )),
    }
}

#[cfg(feature = "dynamodb")]
async fn connect_dynamodb(url: &Url) -> Result<Arc<dyn Driver>> {
    let driver = lag_cache_driver_dynamodb::DynamoDb::connect(url.as_str()).await?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "dynamodb"))]
async fn connect_dynamodb(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(lag_cache_core::err!("`dynamodb` feature not enabled"))
}
