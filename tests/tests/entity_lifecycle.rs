use lag_cache::{driver::Operation, Cache, Entity, EntityKind, Record, Schema, State, Table};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tests::{fixtures, CacheTest, FailingDriver, MemoryDriver};

fn record(value: serde_json::Value) -> Record {
    Record::from_json(value).unwrap()
}

#[tokio::test]
async fn populate_drops_fields_outside_the_whitelist() {
    let test = CacheTest::new();

    for (kind, incoming) in [
        (EntityKind::Loan, fixtures::loan("L1")),
        (EntityKind::Request, fixtures::request("R1")),
        (EntityKind::Fee, fixtures::fee("F1")),
    ] {
        let id = incoming.get_str(kind.schema().primary_key).unwrap().to_string();
        let mut entity = test.cache.entity(kind, &id).unwrap();
        entity.populate(&incoming);

        for attribute in entity.data().keys() {
            assert!(
                kind.schema().allows(attribute),
                "{kind} kept unexpected attribute `{attribute}`"
            );
        }
    }

    let mut loan = test.cache.loan("L1").unwrap();
    loan.populate(&fixtures::loan("L1"));
    assert!(!loan.data().contains("circ_desk"));
    assert!(!loan.data().contains("link"));
    assert_eq!(loan.data().get_str("title"), Some("Dune"));
}

#[tokio::test]
async fn queued_users_keep_only_their_key_and_ttl() {
    let test = CacheTest::new();

    let mut queued = test.cache.queued_user("patron1").unwrap();
    queued
        .populate(&record(json!({"primary_id": "patron1", "loan_ids": ["L1"], "position": 3})))
        .save_at(0)
        .await
        .unwrap();

    assert_eq!(
        test.stored(EntityKind::QueuedUser, "patron1").unwrap(),
        record(json!({"primary_id": "patron1", "expiry_date": 300}))
    );
}

#[tokio::test]
async fn populate_merges_partial_updates() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.populate(&record(json!({"title": "Dune", "loan_status": "ACTIVE"})))
        .populate(&record(json!({"loan_status": "LOST"})));

    assert_eq!(
        loan.data(),
        &record(json!({"loan_id": "L1", "title": "Dune", "loan_status": "LOST"}))
    );
    assert_eq!(loan.state(), State::Populated);
}

#[tokio::test]
async fn populate_never_changes_identity() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.populate(&record(json!({"loan_id": "L2", "title": "Dune"})));

    assert_eq!(loan.id(), "L1");
    assert_eq!(loan.data().get_str("loan_id"), Some("L1"));
}

#[tokio::test]
async fn add_expiry_date_only_when_source_is_set() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.add_expiry_date("due_date");
    assert_eq!(loan.expiry(), None);
    assert!(!loan.data().contains("expiry_date"));

    loan.populate(&record(json!({"due_date": "1970-01-01T00:00:01.750Z"})))
        .add_expiry_date("due_date");
    assert_eq!(loan.expiry(), Some(1));
}

#[tokio::test]
async fn request_expiry_lands_in_record_expiry_date() {
    let test = CacheTest::new();

    let mut request = test.cache.request("R1").unwrap();
    request
        .populate(&record(json!({
            "expiry_date": "2018-06-20Z",
            "request_date": "1970-01-01T00:00:10Z"
        })))
        .add_expiry_date("request_date");

    assert_eq!(request.expiry(), Some(10));
    assert_eq!(request.data()["record_expiry_date"], json!(10));
    assert_eq!(request.data()["expiry_date"], json!("2018-06-20Z"));

    request.save_at(1_000).await.unwrap();

    let stored = test.stored(EntityKind::Request, "R1").unwrap();
    assert_eq!(stored["record_expiry_date"], json!(10));
    assert_eq!(stored["expiry_date"], json!("2018-06-20Z"));
}

#[tokio::test]
async fn numeric_due_dates_are_epoch_millis() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.populate(&record(json!({"due_date": 1_525_186_800_000_i64})))
        .add_expiry_date("due_date");
    assert_eq!(loan.expiry(), Some(1_525_186_800));

    let mut unstamped = test.cache.loan("L2").unwrap();
    unstamped
        .populate(&record(json!({"due_date": 2_000})))
        .save_at(0)
        .await
        .unwrap();
    assert_eq!(
        test.stored(EntityKind::Loan, "L2").unwrap()["expiry_date"],
        json!(2)
    );
}

#[tokio::test]
async fn users_cannot_be_handled_as_plain_entities() {
    let mut test = CacheTest::new();
    test.seed(
        EntityKind::User,
        record(json!({"primary_id": "patron1", "loan_ids": ["L1", "L2"], "expiry_date": 9})),
    );
    test.log().clear();

    assert!(test
        .cache
        .entity(EntityKind::User, "patron1")
        .unwrap_err()
        .is_validation());
    assert!(test
        .cache
        .get_valid_at(EntityKind::User, "patron1", 0)
        .await
        .unwrap_err()
        .is_validation());

    let users = test.cache.table(EntityKind::User).unwrap().clone();
    let stored = test.stored(EntityKind::User, "patron1").unwrap();
    assert!(Entity::load(users, stored.clone()).unwrap_err().is_validation());

    // Nothing reached the store and the association lists are intact
    assert!(test.log().is_empty());
    assert_eq!(test.stored(EntityKind::User, "patron1").unwrap(), stored);
}

#[tokio::test]
async fn saving_a_loan_derives_expiry_from_due_date() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.populate(&record(json!({"loan_id": "L1", "due_date": "1970-01-01T00:00:00Z"})));
    loan.save_at(1_700_000_000).await.unwrap();

    let stored = test.stored(EntityKind::Loan, "L1").unwrap();
    assert_eq!(stored["expiry_date"], json!(0));
    assert_eq!(loan.state(), State::Saved);
}

#[tokio::test]
async fn saving_a_loan_without_due_date_expires_immediately() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.save_at(1_700_000_000).await.unwrap();

    assert_eq!(
        test.stored(EntityKind::Loan, "L1").unwrap()["expiry_date"],
        json!(0)
    );
}

#[tokio::test]
async fn fixed_offset_defaults() {
    let test = CacheTest::new();
    let now = 1_000;

    let mut fee = test.cache.fee("F1").unwrap();
    fee.populate(&fixtures::fee("F1")).save_at(now).await.unwrap();

    let mut queued = test.cache.queued_user("patron1").unwrap();
    queued.save_at(now).await.unwrap();

    assert_eq!(
        test.stored(EntityKind::Fee, "F1").unwrap()["expiry_date"],
        json!(now + 1_209_600)
    );
    assert_eq!(
        test.stored(EntityKind::QueuedUser, "patron1").unwrap()["expiry_date"],
        json!(now + 300)
    );
}

#[tokio::test]
async fn existing_expiry_is_kept_on_save() {
    let test = CacheTest::new();

    let mut fee = test.cache.fee("F1").unwrap();
    fee.populate(&record(json!({"expiry_date": 42}))).save_at(1_000).await.unwrap();

    assert_eq!(fee.expiry(), Some(42));
}

#[tokio::test]
async fn request_ttl_is_kept_apart_from_business_expiry() {
    let test = CacheTest::new();
    let now = 2_000;

    let mut request = test.cache.request("R1").unwrap();
    request.populate(&fixtures::request("R1")).save_at(now).await.unwrap();

    let stored = test.stored(EntityKind::Request, "R1").unwrap();
    assert_eq!(stored["expiry_date"], json!("2018-06-20Z"));
    assert_eq!(stored["record_expiry_date"], json!(now + 1_209_600));
    assert_eq!(stored["user_primary_id"], json!("patron1"));
    assert_eq!(
        stored["request_sub_type"],
        json!({"value": "PATRON_PHYSICAL", "desc": "Patron physical item request"})
    );
    assert!(!stored.contains("task_name"));
}

#[tokio::test]
async fn fee_transactions_are_stored_verbatim() {
    let test = CacheTest::new();

    let mut fee = test.cache.fee("F1").unwrap();
    fee.populate(&fixtures::fee("F1")).save().await.unwrap();

    assert_eq!(
        test.stored(EntityKind::Fee, "F1").unwrap()["transactions"],
        json!([{"type": "PAYMENT", "amount": 2.5, "received_by": "desk"}])
    );
}

#[tokio::test]
async fn populate_after_save_needs_another_save() {
    let mut test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.populate(&record(json!({"title": "Dune"})));
    loan.save_at(0).await.unwrap();

    loan.populate(&record(json!({"title": "Dune Messiah"})));
    assert_eq!(loan.state(), State::Populated);
    assert_eq!(
        test.stored(EntityKind::Loan, "L1").unwrap()["title"],
        json!("Dune")
    );

    loan.save_at(0).await.unwrap();
    assert_eq!(
        test.stored(EntityKind::Loan, "L1").unwrap()["title"],
        json!("Dune Messiah")
    );
    assert_eq!(test.log().count_puts(), 2);
}

#[tokio::test]
async fn delete_removes_by_primary_key() {
    let mut test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.save_at(0).await.unwrap();
    test.log().clear();

    loan.delete().await.unwrap();

    assert_eq!(loan.state(), State::Deleted);
    assert!(test.stored(EntityKind::Loan, "L1").is_none());

    let (op, _) = test.log().pop().unwrap();
    let Operation::DeleteByKey(op) = op else {
        panic!("expected delete; actual={op:?}");
    };
    assert_eq!(op.table, "LoanCache");
    assert_eq!(op.key.attribute, "loan_id");
    assert_eq!(op.key.value, "L1");
}

#[tokio::test]
async fn deleted_is_terminal() {
    let test = CacheTest::new();

    let mut loan = test.cache.loan("L1").unwrap();
    loan.save_at(0).await.unwrap();
    loan.delete().await.unwrap();

    assert!(loan.save_at(0).await.unwrap_err().is_invalid_state());
    assert!(loan.delete().await.unwrap_err().is_invalid_state());

    loan.populate(&record(json!({"title": "Dune"})));
    assert_eq!(loan.state(), State::Deleted);
    assert!(test.stored(EntityKind::Loan, "L1").is_none());
}

#[tokio::test]
async fn construction_requires_identity_and_table() {
    let test = CacheTest::new();

    assert!(test.cache.loan("").unwrap_err().is_validation());
    assert!(test.cache.fee("   ").unwrap_err().is_validation());

    let driver = Arc::new(MemoryDriver::new());
    assert!(Table::new(driver, "", EntityKind::Loan.schema())
        .unwrap_err()
        .is_validation());

    let partial = Cache::builder()
        .table(EntityKind::Loan, "LoanCache")
        .build(MemoryDriver::new())
        .unwrap();
    assert!(partial.fee("F1").unwrap_err().is_validation());
}

#[tokio::test]
async fn store_errors_propagate_unchanged() {
    let driver = FailingDriver::new(Arc::new(MemoryDriver::new()), |op| !op.is_get_by_key());
    let cache = Cache::builder()
        .table(EntityKind::Loan, "LoanCache")
        .build(driver)
        .unwrap();

    let mut loan = cache.loan("L1").unwrap();

    let err = loan.save_at(0).await.unwrap_err();
    assert!(err.is_driver());
    assert!(err.to_string().contains("ProvisionedThroughputExceededException"));
    assert_eq!(loan.state(), State::Populated);

    assert!(loan.delete().await.unwrap_err().is_driver());
    assert_ne!(loan.state(), State::Deleted);
}

#[tokio::test]
async fn load_filters_attributes_written_by_other_tools() {
    let test = CacheTest::new();
    let table = test.cache.table(EntityKind::Loan).unwrap().clone();

    let entity = Entity::load(table, fixtures::loan("L1")).unwrap();

    assert_eq!(entity.state(), State::Saved);
    assert!(!entity.data().contains("link"));
    assert_eq!(entity.data().get_str("loan_id"), Some("L1"));
}

#[tokio::test]
async fn schemaless_entities_ignore_populate_but_load_everything() {
    let store = MemoryDriver::new();
    let table = Table::new(Arc::new(store.clone()), "Scratch", &Schema::BASE).unwrap();

    let mut entity = Entity::new(table.clone(), "X1").unwrap();
    entity
        .populate(&record(json!({"anything": [1, 2]})))
        .save_at(0)
        .await
        .unwrap();

    assert_eq!(
        store.get("Scratch", "X1").unwrap(),
        record(json!({"id": "X1", "expiry_date": 1_209_600}))
    );

    let written_elsewhere = record(json!({"id": "X2", "else": {"a": true}}));
    let loaded = Entity::load(table, written_elsewhere.clone()).unwrap();
    assert_eq!(loaded.data(), &written_elsewhere);
}
