use crate::{
    expiry, projector,
    schema::{EntityKind, Schema},
    valid, Error, Record, Result, Table, Value,
};

/// Where an [`Entity`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Created in memory, nothing written yet
    Unsaved,

    /// Data changed since construction or the last save
    Populated,

    /// Data matches what was last written to the store
    Saved,

    /// Removed from the store. Terminal.
    Deleted,
}

/// A cached record: identity, whitelisted data and a TTL.
///
/// Nothing is cached in-process; every `save`, `delete` and `get_valid`
/// round-trips to the store. Changing data after a save does not write it
/// back until `save` is called again.
#[derive(Debug, Clone)]
pub struct Entity {
    id: String,
    table: Table,
    data: Record,
    state: State,
}

impl Entity {
    /// Creates an unsaved entity with only its primary key set.
    ///
    /// User tables are rejected: users carry association lists and a
    /// saveability gate, so they only go through [`User`](crate::User).
    pub fn new(table: Table, id: &str) -> Result<Self> {
        check_table(&table)?;

        if id.trim().is_empty() {
            return Err(Error::validation_missing("identity"));
        }

        let id = table.schema().normalize_key(id);
        let mut data = Record::new();
        data.insert(table.schema().primary_key, Value::from(id.clone()));

        Ok(Self {
            id,
            table,
            data,
            state: State::Unsaved,
        })
    }

    /// Rebuilds an entity from a stored record, dropping attributes the
    /// schema does not allow.
    pub fn load(table: Table, record: Record) -> Result<Self> {
        let schema = table.schema();

        let Some(id) = record.get_str(schema.primary_key).map(str::to_string) else {
            return Err(Error::invalid_record(schema.primary_key, "string"));
        };

        let mut entity = Self::new(table, &id)?;

        entity.data = record
            .into_iter()
            .filter(|(attribute, _)| schema.allows(attribute))
            .collect();
        entity.restore_key();
        entity.state = State::Saved;

        Ok(entity)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn schema(&self) -> &'static Schema {
        self.table.schema()
    }

    pub fn data(&self) -> &Record {
        &self.data
    }

    pub fn into_data(self) -> Record {
        self.data
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The cache TTL, once computed.
    pub fn expiry(&self) -> Option<i64> {
        self.data.get_i64(self.schema().expiry_attribute)
    }

    /// Merges the whitelisted attributes of `incoming` into this entity.
    ///
    /// The primary key always keeps the entity's identity, even when
    /// `incoming` carries a different one.
    pub fn populate(&mut self, incoming: &Record) -> &mut Self {
        let schema = self.schema();
        let allowed = schema.allowed_fields();

        let mut data = projector::populate(&self.data, incoming, &allowed);

        for field in schema.lowercase_fields {
            if let Some(lower) = data.get_str(field).map(str::to_lowercase) {
                data.insert(*field, Value::from(lower));
            }
        }

        self.data = data;
        self.restore_key();
        self.mark_changed();
        self
    }

    /// Sets the TTL from the date held in `source_field`.
    ///
    /// Nothing happens when `source_field` is unset. Numbers are epoch
    /// milliseconds. A value that cannot be read as a date gives a TTL of `0`.
    pub fn add_expiry_date(&mut self, source_field: &str) -> &mut Self {
        let date = match self.data.get(source_field) {
            None | Some(Value::Null) => return self,
            Some(Value::String(date)) if date.is_empty() => return self,
            date => date,
        };

        let expiry = expiry::from_date_value(date);
        let expiry_attribute = self.schema().expiry_attribute;
        self.data.insert(expiry_attribute, Value::from(expiry));
        self.mark_changed();
        self
    }

    /// Stamps the schema's default TTL, computed as of `now`, if none is set.
    pub fn apply_default_expiry_at(&mut self, now: i64) -> &mut Self {
        let schema = self.schema();

        if !self.data.contains(schema.expiry_attribute) {
            let expiry = schema.expiry.compute(&self.data, now);
            self.data.insert(schema.expiry_attribute, Value::from(expiry));
            self.mark_changed();
        }

        self
    }

    /// Writes the entity to the store, creating or overwriting it.
    pub async fn save(&mut self) -> Result<()> {
        self.save_at(expiry::now()).await
    }

    /// Same as [`save`](Self::save), computing a default TTL as of `now`.
    pub async fn save_at(&mut self, now: i64) -> Result<()> {
        self.ensure_not_deleted("save")?;
        self.apply_default_expiry_at(now);

        self.table.put(self.data.clone()).await?;
        self.state = State::Saved;

        Ok(())
    }

    /// Removes the entity from the store by primary key.
    pub async fn delete(&mut self) -> Result<()> {
        self.ensure_not_deleted("delete")?;

        self.table.delete(&self.id).await?;
        self.state = State::Deleted;

        Ok(())
    }

    /// Fetches an entity, treating an expired record as absent.
    pub async fn get_valid(table: &Table, id: &str) -> Result<Option<Entity>> {
        Self::get_valid_at(table, id, expiry::now()).await
    }

    pub async fn get_valid_at(table: &Table, id: &str, now: i64) -> Result<Option<Entity>> {
        check_table(table)?;

        let expiry_attribute = table.schema().expiry_attribute;

        match valid::get_valid(table, id, expiry_attribute, now).await? {
            Some(record) => Ok(Some(Self::load(table.clone(), record)?)),
            None => Ok(None),
        }
    }

    fn restore_key(&mut self) {
        let primary_key = self.schema().primary_key;
        if self.data.get_str(primary_key) != Some(self.id.as_str()) {
            self.data.insert(primary_key, Value::from(self.id.clone()));
        }
    }

    fn mark_changed(&mut self) {
        if self.state != State::Deleted {
            self.state = State::Populated;
        }
    }

    fn ensure_not_deleted(&self, action: &str) -> Result<()> {
        if self.state == State::Deleted {
            return Err(Error::invalid_state(format!(
                "cannot {action} deleted {} `{}`",
                self.schema().name,
                self.id
            )));
        }
        Ok(())
    }
}

fn check_table(table: &Table) -> Result<()> {
    if table.schema() == EntityKind::User.schema() {
        return Err(Error::validation_invalid(
            "table",
            format!("`{}` holds users; use `User` instead", table.name()),
        ));
    }
    Ok(())
}
