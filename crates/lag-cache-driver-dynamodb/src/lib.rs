mod op;
mod value;

pub(crate) use value::Value;

use lag_cache_core::{
    async_trait,
    driver::{operation::Operation, Driver, Response},
    Key, Record, Result,
};

use aws_sdk_dynamodb::{types::AttributeValue, Client};
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone)]
pub struct DynamoDb {
    /// Handle to the AWS SDK client
    client: Client,
}

impl DynamoDb {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects using a `dynamodb://[host[:port]]` URL.
    ///
    /// With a host, requests go to `http://host:port` (DynamoDB Local and
    /// friends). Without one, the SDK's default endpoint resolution is used.
    pub async fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(lag_cache_core::Error::driver)?;

        if url.scheme() != "dynamodb" {
            lag_cache_core::bail!("connection URL does not have a `dynamodb` scheme; url={url}");
        }

        use aws_config::BehaviorVersion;

        let mut aws_config = aws_config::defaults(BehaviorVersion::latest());

        if let Some(host) = url.host() {
            use aws_sdk_dynamodb::config::Credentials;

            let mut endpoint_url = format!("http://{host}");

            if let Some(port) = url.port() {
                endpoint_url.push_str(&format!(":{port}"));
            }

            aws_config = aws_config
                .region("us-east-1")
                .credentials_provider(Credentials::for_tests())
                .endpoint_url(&endpoint_url);
        }

        let sdk_config = aws_config.load().await;

        Ok(Self::new(Client::new(&sdk_config)))
    }
}

#[async_trait]
impl Driver for DynamoDb {
    async fn exec(&self, op: Operation) -> Result<Response> {
        match op {
            Operation::GetByKey(op) => self.exec_get_by_key(op).await,
            Operation::BatchGetByKey(op) => self.exec_batch_get_by_key(op).await,
            Operation::Put(op) => self.exec_put(op).await,
            Operation::DeleteByKey(op) => self.exec_delete_by_key(op).await,
        }
    }
}

fn ddb_key(key: &Key) -> HashMap<String, AttributeValue> {
    let mut ret = HashMap::new();
    ret.insert(key.attribute.clone(), AttributeValue::S(key.value.clone()));
    ret
}

fn item_to_record(item: HashMap<String, AttributeValue>) -> Result<Record> {
    item.into_iter()
        .map(|(name, value)| Ok((name, Value::from_ddb(&value)?.into_inner())))
        .collect()
}

fn record_to_item(record: Record) -> HashMap<String, AttributeValue> {
    record
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name, Value::from(value).to_ddb()))
        .collect()
}
