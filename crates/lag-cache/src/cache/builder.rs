use super::{connect, Cache, CacheConfig};
use crate::{schema::EntityKind, Result, Table};

use lag_cache_core::driver::Driver;

use std::{collections::HashMap, sync::Arc};

#[derive(Debug, Default)]
pub struct Builder {
    /// Table name per entity kind
    tables: HashMap<EntityKind, String>,
}

impl Builder {
    /// Sets the table backing `kind`.
    pub fn table(&mut self, kind: EntityKind, name: impl Into<String>) -> &mut Self {
        self.tables.insert(kind, name.into());
        self
    }

    /// Takes every table name set in `config`.
    pub fn config(&mut self, config: &CacheConfig) -> &mut Self {
        for (kind, name) in config.tables.iter() {
            self.table(kind, name);
        }
        self
    }

    /// Builds a cache over an existing driver.
    pub fn build(&self, driver: impl Driver) -> Result<Cache> {
        self.build_shared(Arc::new(driver))
    }

    pub fn build_shared(&self, driver: Arc<dyn Driver>) -> Result<Cache> {
        let tables = self
            .tables
            .iter()
            .map(|(kind, name)| {
                let table = Table::new(driver.clone(), name, kind.schema())?;
                Ok((*kind, table))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Cache { driver, tables })
    }

    /// Connects to the store at `url` and builds the cache.
    pub async fn connect(&self, url: &str) -> Result<Cache> {
        let driver = connect(url).await?;
        self.build_shared(driver)
    }
}
