//! Per-entity field whitelists and expiry policies.
//!
//! Entities are described by data rather than by type: [`EntityKind`] tags a
//! record and [`EntityKind::schema`] looks up everything that differs between
//! them.

use crate::{
    expiry::{self, Unit},
    Record,
};

/// The kinds of record kept in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Loan,
    Request,
    Fee,
    User,
    QueuedUser,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Loan,
        EntityKind::Request,
        EntityKind::Fee,
        EntityKind::User,
        EntityKind::QueuedUser,
    ];

    pub fn schema(self) -> &'static Schema {
        match self {
            EntityKind::Loan => &LOAN,
            EntityKind::Request => &REQUEST,
            EntityKind::Fee => &FEE,
            EntityKind::User => &USER,
            EntityKind::QueuedUser => &QUEUED_USER,
        }
    }

    pub fn name(self) -> &'static str {
        self.schema().name
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the cache TTL of a record is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// A fixed offset from the time of writing.
    Offset { amount: i64, unit: Unit },

    /// Parsed from a date attribute of the record itself. Missing dates give `0`.
    DateField(&'static str),
}

impl ExpiryPolicy {
    /// Computes the TTL for `record` as of `now`.
    pub fn compute(&self, record: &Record, now: i64) -> i64 {
        match *self {
            ExpiryPolicy::Offset { amount, unit } => expiry::fixed_offset(now, amount, unit),
            ExpiryPolicy::DateField(field) => expiry::from_date_value(record.get(field)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    /// Human readable name, used in logs and error messages
    pub name: &'static str,

    /// Name of the primary-key attribute
    pub primary_key: &'static str,

    /// Attribute holding the cache TTL, in unix seconds
    pub expiry_attribute: &'static str,

    /// Attributes `populate` accepts, besides the primary key and TTL
    pub fields: &'static [&'static str],

    pub expiry: ExpiryPolicy,

    /// Primary-key values are compared case-insensitively and stored lowercase
    pub lowercase_key: bool,

    /// String attributes stored lowercase
    pub lowercase_fields: &'static [&'static str],
}

impl Schema {
    /// A schema with no declared fields. `populate` passes data through untouched.
    pub const BASE: Schema = Schema {
        name: "record",
        primary_key: "id",
        expiry_attribute: "expiry_date",
        fields: &[],
        expiry: ExpiryPolicy::Offset {
            amount: 2,
            unit: Unit::Weeks,
        },
        lowercase_key: false,
        lowercase_fields: &[],
    };

    /// Returns `true` if `attribute` may be stored on records of this schema.
    pub fn allows(&self, attribute: &str) -> bool {
        self.fields.is_empty()
            || attribute == self.primary_key
            || attribute == self.expiry_attribute
            || self.fields.iter().any(|field| *field == attribute)
    }

    /// The attributes `populate` accepts, primary key first and TTL last.
    pub fn allowed_fields(&self) -> Vec<&'static str> {
        if self.fields.is_empty() {
            return vec![];
        }

        let mut allowed = Vec::with_capacity(self.fields.len() + 2);
        allowed.push(self.primary_key);
        allowed.extend(
            self.fields
                .iter()
                .copied()
                .filter(|field| *field != self.primary_key && *field != self.expiry_attribute),
        );
        allowed.push(self.expiry_attribute);
        allowed
    }

    /// Canonical form of a primary-key value.
    pub fn normalize_key(&self, value: &str) -> String {
        if self.lowercase_key {
            value.to_lowercase()
        } else {
            value.to_string()
        }
    }
}

static LOAN: Schema = Schema {
    name: "loan",
    primary_key: "loan_id",
    expiry_attribute: "expiry_date",
    fields: &[
        "loan_id",
        "user_id",
        "renewable",
        "call_number",
        "loan_status",
        "due_date",
        "item_barcode",
        "mms_id",
        "title",
        "author",
        "description",
        "publication_year",
        "process_status",
    ],
    expiry: ExpiryPolicy::DateField("due_date"),
    lowercase_key: false,
    lowercase_fields: &[],
};

// `expiry_date` on a request is the request's own business expiry (a date
// string). The cache TTL is kept apart in `record_expiry_date`.
static REQUEST: Schema = Schema {
    name: "request",
    primary_key: "request_id",
    expiry_attribute: "record_expiry_date",
    fields: &[
        "request_id",
        "user_primary_id",
        "request_type",
        "request_sub_type",
        "request_status",
        "pickup_location",
        "pickup_location_type",
        "pickup_location_library",
        "material_type",
        "comment",
        "place_in_queue",
        "request_date",
        "expiry_date",
        "barcode",
        "mms_id",
        "title",
        "author",
        "description",
        "resource_sharing",
        "process_status",
    ],
    expiry: ExpiryPolicy::Offset {
        amount: 2,
        unit: Unit::Weeks,
    },
    lowercase_key: false,
    lowercase_fields: &["user_primary_id"],
};

static FEE: Schema = Schema {
    name: "fee",
    primary_key: "id",
    expiry_attribute: "expiry_date",
    fields: &[
        "id",
        "user_primary_id",
        "type",
        "status",
        "balance",
        "remaining_vat_amount",
        "original_amount",
        "original_vat_amount",
        "creation_time",
        "status_time",
        "comment",
        "owner",
        "title",
        "barcode",
        "bursar_transaction_id",
        "transactions",
    ],
    expiry: ExpiryPolicy::Offset {
        amount: 2,
        unit: Unit::Weeks,
    },
    lowercase_key: false,
    lowercase_fields: &[],
};

static USER: Schema = Schema {
    name: "user",
    primary_key: "primary_id",
    expiry_attribute: "expiry_date",
    fields: &["primary_id", "loan_ids", "request_ids", "fee_ids"],
    expiry: ExpiryPolicy::Offset {
        amount: 2,
        unit: Unit::Hours,
    },
    lowercase_key: true,
    lowercase_fields: &[],
};

static QUEUED_USER: Schema = Schema {
    name: "queued user",
    primary_key: "primary_id",
    expiry_attribute: "expiry_date",
    fields: &["primary_id"],
    expiry: ExpiryPolicy::Offset {
        amount: 5,
        unit: Unit::Minutes,
    },
    lowercase_key: false,
    lowercase_fields: &[],
};
