mod builder;
mod config;
mod connect;

pub use builder::Builder;
pub use config::{CacheConfig, TableNames};
pub use connect::connect;

use crate::{expiry, schema::EntityKind, Entity, Error, Result, Table, User};

use lag_cache_core::driver::Driver;

use std::{collections::HashMap, sync::Arc};

/// Entry point: one driver shared by a table per entity kind.
#[derive(Debug, Clone)]
pub struct Cache {
    driver: Arc<dyn Driver>,
    tables: HashMap<EntityKind, Table>,
}

impl Cache {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// The table configured for `kind`.
    pub fn table(&self, kind: EntityKind) -> Result<&Table> {
        self.tables
            .get(&kind)
            .ok_or_else(|| Error::validation_missing(format!("{kind} table")))
    }

    /// Like [`table`](Cache::table), but `None` when the kind has no table.
    pub fn try_table(&self, kind: EntityKind) -> Option<&Table> {
        self.tables.get(&kind)
    }

    /// An unsaved entity of `kind`. Users are not entities; see
    /// [`user`](Cache::user).
    pub fn entity(&self, kind: EntityKind, id: &str) -> Result<Entity> {
        Entity::new(self.table(kind)?.clone(), id)
    }

    pub fn loan(&self, loan_id: &str) -> Result<Entity> {
        self.entity(EntityKind::Loan, loan_id)
    }

    pub fn request(&self, request_id: &str) -> Result<Entity> {
        self.entity(EntityKind::Request, request_id)
    }

    pub fn fee(&self, fee_id: &str) -> Result<Entity> {
        self.entity(EntityKind::Fee, fee_id)
    }

    pub fn queued_user(&self, primary_id: &str) -> Result<Entity> {
        self.entity(EntityKind::QueuedUser, primary_id)
    }

    /// A user whose association lists still need [`User::get_data`].
    pub fn user(&self, primary_id: &str) -> Result<User> {
        User::new(self.table(EntityKind::User)?.clone(), primary_id)
    }

    /// A brand new, saveable user.
    pub fn create_user(&self, primary_id: &str) -> Result<User> {
        User::create(self.table(EntityKind::User)?.clone(), primary_id)
    }

    pub async fn get_valid(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        self.get_valid_at(kind, id, expiry::now()).await
    }

    pub async fn get_valid_at(
        &self,
        kind: EntityKind,
        id: &str,
        now: i64,
    ) -> Result<Option<Entity>> {
        Entity::get_valid_at(self.table(kind)?, id, now).await
    }

    pub async fn get_valid_user(&self, primary_id: &str) -> Result<Option<User>> {
        self.get_valid_user_at(primary_id, expiry::now()).await
    }

    pub async fn get_valid_user_at(&self, primary_id: &str, now: i64) -> Result<Option<User>> {
        User::get_valid_at(self.table(EntityKind::User)?, primary_id, now).await
    }

    /// Hydrates loans, requests and fees of `user` from whichever of those
    /// tables are configured.
    pub async fn hydrate_user(&self, user: &mut User) -> Result<()> {
        user.populate_loans(self.try_table(EntityKind::Loan))
            .await?
            .populate_requests(self.try_table(EntityKind::Request))
            .await?
            .populate_fees(self.try_table(EntityKind::Fee))
            .await?;
        Ok(())
    }
}
