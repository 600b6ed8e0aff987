use crate::schema::EntityKind;

/// Environment variable holding the store URL.
pub const URL_VAR: &str = "LAG_CACHE_URL";

const DEFAULT_URL: &str = "dynamodb://";

/// Where the cache lives: a store URL plus one table name per entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub url: String,
    pub tables: TableNames,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableNames {
    pub loan: Option<String>,
    pub request: Option<String>,
    pub fee: Option<String>,
    pub user: Option<String>,
    pub queued_user: Option<String>,
}

impl CacheConfig {
    /// Reads `LAG_CACHE_URL` and the `LAG_CACHE_*_TABLE` variables.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup. Empty values count as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let mut tables = TableNames::default();
        for kind in EntityKind::ALL {
            *tables.get_mut(kind) = var(TableNames::var_name(kind));
        }

        Self {
            url: var(URL_VAR).unwrap_or_else(|| DEFAULT_URL.to_string()),
            tables,
        }
    }
}

impl TableNames {
    /// Environment variable holding the table name for `kind`.
    pub fn var_name(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Loan => "LAG_CACHE_LOAN_TABLE",
            EntityKind::Request => "LAG_CACHE_REQUEST_TABLE",
            EntityKind::Fee => "LAG_CACHE_FEE_TABLE",
            EntityKind::User => "LAG_CACHE_USER_TABLE",
            EntityKind::QueuedUser => "LAG_CACHE_QUEUED_USER_TABLE",
        }
    }

    pub fn get(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Loan => self.loan.as_deref(),
            EntityKind::Request => self.request.as_deref(),
            EntityKind::Fee => self.fee.as_deref(),
            EntityKind::User => self.user.as_deref(),
            EntityKind::QueuedUser => self.queued_user.as_deref(),
        }
    }

    fn get_mut(&mut self, kind: EntityKind) -> &mut Option<String> {
        match kind {
            EntityKind::Loan => &mut self.loan,
            EntityKind::Request => &mut self.request,
            EntityKind::Fee => &mut self.fee,
            EntityKind::User => &mut self.user,
            EntityKind::QueuedUser => &mut self.queued_user,
        }
    }

    /// The configured `(kind, table name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        EntityKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|name| (kind, name)))
    }
}
