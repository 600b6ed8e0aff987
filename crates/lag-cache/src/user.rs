use crate::{
    expiry, hydrate::hydrate, id_set, schema::EntityKind, valid, Error, Record, Result, Table,
    Value,
};

/// The cached view of a library user: which loans, requests and fees belong
/// to them.
///
/// A `User` built with [`User::new`] has not read its association lists
/// yet and refuses to save, so a partially known user can never overwrite
/// the stored one. Call [`get_data`](User::get_data) first, or start from
/// [`User::create`] for a brand new record.
#[derive(Debug, Clone)]
pub struct User {
    primary_id: String,
    table: Table,
    loan_ids: Vec<String>,
    request_ids: Vec<String>,
    fee_ids: Vec<String>,
    expiry: Option<i64>,
    saveable: bool,

    // Hydrated records. Never persisted.
    loans: Option<Vec<Record>>,
    requests: Option<Vec<Record>>,
    fees: Option<Vec<Record>>,
}

impl User {
    /// A user whose association lists have not been loaded.
    pub fn new(table: Table, primary_id: &str) -> Result<Self> {
        if table.schema() != EntityKind::User.schema() {
            return Err(Error::validation_invalid(
                "table",
                format!(
                    "`{}` holds {} records, not users",
                    table.name(),
                    table.schema().name
                ),
            ));
        }

        if primary_id.trim().is_empty() {
            return Err(Error::validation_missing("primary_id"));
        }

        Ok(Self {
            primary_id: table.schema().normalize_key(primary_id),
            table,
            loan_ids: vec![],
            request_ids: vec![],
            fee_ids: vec![],
            expiry: None,
            saveable: false,
            loans: None,
            requests: None,
            fees: None,
        })
    }

    /// A brand new user with empty association lists, ready to save.
    pub fn create(table: Table, primary_id: &str) -> Result<Self> {
        let mut user = Self::new(table, primary_id)?;
        user.saveable = true;
        Ok(user)
    }

    /// Rebuilds a user from a stored record.
    pub fn from_record(table: Table, record: &Record) -> Result<Self> {
        let schema = EntityKind::User.schema();

        let Some(primary_id) = record.get_str(schema.primary_key) else {
            return Err(Error::invalid_record(schema.primary_key, "string"));
        };

        let mut user = Self::new(table, primary_id)?;
        user.apply(record)?;
        Ok(user)
    }

    /// Loads the association lists from the store, making the user saveable.
    ///
    /// Fails with a record-not-found error when no record exists. Expiry is
    /// not checked; use [`get_valid`](User::get_valid) for that.
    pub async fn get_data(&mut self) -> Result<&mut Self> {
        let Some(record) = self.table.get(&self.primary_id).await? else {
            return Err(Error::record_not_found(format!(
                "table={} key={}",
                self.table.name(),
                self.table.key(&self.primary_id)
            )));
        };

        self.apply(&record)?;
        Ok(self)
    }

    /// Fetches a user, treating an expired record as absent.
    pub async fn get_valid(table: &Table, primary_id: &str) -> Result<Option<User>> {
        Self::get_valid_at(table, primary_id, expiry::now()).await
    }

    pub async fn get_valid_at(table: &Table, primary_id: &str, now: i64) -> Result<Option<User>> {
        let expiry_attribute = table.schema().expiry_attribute;

        match valid::get_valid(table, primary_id, expiry_attribute, now).await? {
            Some(record) => Ok(Some(Self::from_record(table.clone(), &record)?)),
            None => Ok(None),
        }
    }

    pub fn primary_id(&self) -> &str {
        &self.primary_id
    }

    pub fn loan_ids(&self) -> &[String] {
        &self.loan_ids
    }

    pub fn request_ids(&self) -> &[String] {
        &self.request_ids
    }

    pub fn fee_ids(&self) -> &[String] {
        &self.fee_ids
    }

    pub fn expiry(&self) -> Option<i64> {
        self.expiry
    }

    pub fn is_saveable(&self) -> bool {
        self.saveable
    }

    /// Hydrated loan records, if [`populate_loans`](User::populate_loans) ran.
    pub fn loans(&self) -> Option<&[Record]> {
        self.loans.as_deref()
    }

    pub fn requests(&self) -> Option<&[Record]> {
        self.requests.as_deref()
    }

    pub fn fees(&self) -> Option<&[Record]> {
        self.fees.as_deref()
    }

    pub fn add_loan(&mut self, loan_id: &str) -> &mut Self {
        self.loan_ids = id_set::add(&self.loan_ids, loan_id);
        self
    }

    pub fn add_request(&mut self, request_id: &str) -> &mut Self {
        self.request_ids = id_set::add(&self.request_ids, request_id);
        self
    }

    pub fn add_fee(&mut self, fee_id: &str) -> &mut Self {
        self.fee_ids = id_set::add(&self.fee_ids, fee_id);
        self
    }

    pub fn delete_loan(&mut self, loan_id: &str) -> &mut Self {
        self.loan_ids = id_set::remove(&self.loan_ids, loan_id);
        self
    }

    pub fn delete_request(&mut self, request_id: &str) -> &mut Self {
        self.request_ids = id_set::remove(&self.request_ids, request_id);
        self
    }

    pub fn delete_fee(&mut self, fee_id: &str) -> &mut Self {
        self.fee_ids = id_set::remove(&self.fee_ids, fee_id);
        self
    }

    /// Fetches the records for `loan_ids`. Passing no table leaves the user
    /// with an empty loan list.
    pub async fn populate_loans(&mut self, loans: Option<&Table>) -> Result<&mut Self> {
        let key = EntityKind::Loan.schema().primary_key;
        self.loans = Some(hydrate(&self.loan_ids, loans, key).await?);
        Ok(self)
    }

    pub async fn populate_requests(&mut self, requests: Option<&Table>) -> Result<&mut Self> {
        let key = EntityKind::Request.schema().primary_key;
        self.requests = Some(hydrate(&self.request_ids, requests, key).await?);
        Ok(self)
    }

    pub async fn populate_fees(&mut self, fees: Option<&Table>) -> Result<&mut Self> {
        let key = EntityKind::Fee.schema().primary_key;
        self.fees = Some(hydrate(&self.fee_ids, fees, key).await?);
        Ok(self)
    }

    /// The record that [`save`](User::save) writes. Hydrated records are not
    /// part of it.
    pub fn to_record(&self) -> Record {
        let schema = EntityKind::User.schema();

        let mut record = Record::new();
        record.insert(schema.primary_key, Value::from(self.primary_id.clone()));
        record.insert("loan_ids", Value::from(self.loan_ids.clone()));
        record.insert("request_ids", Value::from(self.request_ids.clone()));
        record.insert("fee_ids", Value::from(self.fee_ids.clone()));
        if let Some(expiry) = self.expiry {
            record.insert(schema.expiry_attribute, Value::from(expiry));
        }
        record
    }

    pub async fn save(&mut self) -> Result<()> {
        self.save_at(expiry::now()).await
    }

    /// Writes the user, stamping a TTL as of `now` if none is set.
    pub async fn save_at(&mut self, now: i64) -> Result<()> {
        if !self.saveable {
            return Err(Error::not_saveable(format!(
                "association lists of user `{}` were never loaded",
                self.primary_id
            )));
        }

        if self.expiry.is_none() {
            self.expiry = Some(self.default_expiry(now));
        }

        self.table.put(self.to_record()).await
    }

    /// Removes the user record from the store.
    pub async fn delete(&self) -> Result<()> {
        self.table.delete(&self.primary_id).await?;
        Ok(())
    }

    fn default_expiry(&self, now: i64) -> i64 {
        EntityKind::User.schema().expiry.compute(&Record::new(), now)
    }

    fn apply(&mut self, record: &Record) -> Result<()> {
        let expiry_attribute = EntityKind::User.schema().expiry_attribute;

        self.loan_ids = dedup(record.get_str_list("loan_ids")?);
        self.request_ids = dedup(record.get_str_list("request_ids")?);
        self.fee_ids = dedup(record.get_str_list("fee_ids")?);
        self.expiry = record.get_i64(expiry_attribute);
        self.saveable = true;
        Ok(())
    }
}

/// Stored lists written by other tools may repeat ids.
fn dedup(ids: Vec<String>) -> Vec<String> {
    ids.iter().fold(vec![], |acc, id| id_set::add(&acc, id))
}
