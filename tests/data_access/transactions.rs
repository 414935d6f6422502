//! Transactions across two connections to one database.

use unit_of_work::{CancellationToken, InMemoryDatabase, RepositoryError, StoreError};

use crate::support::{seeded, two_rows, unit_of_work, TestRow};

#[test]
fn commit_publishes_to_other_connections() {
    let db = InMemoryDatabase::new();
    let writer = unit_of_work(&db);
    let reader = unit_of_work(&db);

    writer.begin_transaction().unwrap();
    writer
        .repository::<TestRow>()
        .write
        .add_range(&two_rows())
        .unwrap();
    writer.save_changes().unwrap();

    // Saved inside the transaction: visible to the writer only.
    assert_eq!(writer.repository::<TestRow>().read.count(None).unwrap(), 2);
    assert_eq!(reader.repository::<TestRow>().read.count(None).unwrap(), 0);

    writer.commit_transaction().unwrap();
    assert_eq!(reader.repository::<TestRow>().read.get_all().unwrap(), two_rows());
}

#[test]
fn rollback_discards_saved_work() {
    let db = seeded(&two_rows());
    let uow = unit_of_work(&db);
    let pair = uow.repository::<TestRow>();

    uow.begin_transaction().unwrap();
    pair.write.add(&TestRow::new(3, "Test3")).unwrap();
    pair.write.remove(&TestRow::new(1, "Test1")).unwrap();
    assert_eq!(uow.save_changes().unwrap(), 2);
    assert_eq!(pair.read.count(None).unwrap(), 2);
    assert!(pair.read.get_by_id(&3).is_ok());

    uow.rollback_transaction().unwrap();

    assert_eq!(pair.read.get_all().unwrap(), two_rows());
    assert_eq!(db.row_count::<TestRow>().unwrap(), 2);
}

#[test]
fn unsaved_changes_are_not_committed() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);

    uow.begin_transaction().unwrap();
    uow.repository::<TestRow>()
        .write
        .add(&TestRow::new(1, "Test1"))
        .unwrap();
    uow.commit_transaction().unwrap();

    assert_eq!(db.row_count::<TestRow>().unwrap(), 0);
    assert_eq!(uow.save_changes().unwrap(), 1);
    assert_eq!(db.row_count::<TestRow>().unwrap(), 1);
}

#[test]
fn transaction_can_be_reopened() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);
    let write = uow.repository::<TestRow>().write;

    uow.begin_transaction().unwrap();
    write.add(&TestRow::new(1, "Test1")).unwrap();
    uow.save_changes().unwrap();
    uow.rollback_transaction().unwrap();

    uow.begin_transaction().unwrap();
    write.add(&TestRow::new(2, "Test2")).unwrap();
    uow.save_changes().unwrap();
    uow.commit_transaction().unwrap();

    let ids: Vec<i32> = uow
        .repository::<TestRow>()
        .read
        .get_all()
        .unwrap()
        .into_iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn async_transaction_round_trip() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);
    let cancel = CancellationToken::new();
    let pair = uow.repository::<TestRow>();

    uow.begin_transaction_async(&cancel).await.unwrap();
    pair.write
        .add_range_async(&two_rows(), &cancel)
        .await
        .unwrap();
    assert_eq!(uow.save_changes_async(&cancel).await.unwrap(), 2);
    uow.commit_transaction_async(&cancel).await.unwrap();

    assert_eq!(db.row_count::<TestRow>().unwrap(), 2);

    uow.begin_transaction_async(&cancel).await.unwrap();
    pair.write.remove(&TestRow::new(1, "Test1")).unwrap();
    uow.save_changes_async(&cancel).await.unwrap();
    uow.rollback_transaction_async(&cancel).await.unwrap();

    assert_eq!(db.row_count::<TestRow>().unwrap(), 2);
}

#[tokio::test]
async fn cancelled_begin_leaves_no_transaction() {
    let uow = unit_of_work(&InMemoryDatabase::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert_eq!(
        uow.begin_transaction_async(&cancel).await.unwrap_err(),
        RepositoryError::Store(StoreError::Cancelled)
    );
    assert!(!uow.store().in_transaction().unwrap());
    assert_eq!(
        uow.commit_transaction().unwrap_err(),
        RepositoryError::Store(StoreError::NoActiveTransaction)
    );
}

#[test]
fn dispose_discards_open_transaction() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);

    uow.begin_transaction().unwrap();
    uow.repository::<TestRow>()
        .write
        .add(&TestRow::new(1, "Test1"))
        .unwrap();
    uow.save_changes().unwrap();
    uow.dispose().unwrap();

    assert_eq!(db.row_count::<TestRow>().unwrap(), 0);
}
