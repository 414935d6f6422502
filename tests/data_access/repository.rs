//! Repository reads and writes against the in-memory store.

use unit_of_work::{
    CancellationToken, Filter, InMemoryDatabase, RepositoryError, StoreError, UnitOfWork,
};

use crate::support::{seeded, two_rows, unit_of_work, RecordingStore, TestRow};

fn named(name: &'static str) -> Filter<TestRow> {
    Filter::new(move |row: &TestRow| row.name == name)
}

#[test]
fn get_by_id_finds_seeded_row() {
    let uow = unit_of_work(&seeded(&two_rows()));
    let read = uow.repository::<TestRow>().read;

    assert_eq!(read.get_by_id(&2).unwrap(), TestRow::new(2, "Test2"));
}

#[tokio::test]
async fn get_by_id_absent_is_not_found() {
    let uow = unit_of_work(&seeded(&two_rows()));
    let read = uow.repository::<TestRow>().read;

    let err = read.get_by_id(&99).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err,
        RepositoryError::NotFound {
            collection: "test_rows",
            key: "99".into(),
        }
    );

    let err = read
        .get_by_id_async(&99, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_all_on_empty_store_is_empty() {
    let uow = unit_of_work(&InMemoryDatabase::new());
    let read = uow.repository::<TestRow>().read;

    assert!(read.get_all().unwrap().is_empty());
    assert!(read
        .get_all_async(&CancellationToken::new())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn get_all_async_returns_seeded_rows_in_store_order() {
    let uow = unit_of_work(&seeded(&two_rows()));
    let rows = uow
        .repository::<TestRow>()
        .read
        .get_all_async(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(rows, two_rows());
}

#[test]
fn find_is_lazy_and_restartable() {
    let db = seeded(&two_rows());
    let store = RecordingStore::new(&db);
    let log = store.call_log();
    let uow = UnitOfWork::new(store);
    let pair = uow.repository::<TestRow>();

    let matches = pair.read.find(named("Test2"));
    assert!(log.lock().unwrap().is_empty());

    let first: Vec<TestRow> = matches.iter().unwrap().collect();
    assert_eq!(first, vec![TestRow::new(2, "Test2")]);

    // Saved between iterations: the second pass re-runs the query.
    pair.write.add(&TestRow::new(3, "Test2")).unwrap();
    uow.save_changes().unwrap();

    let second = matches.to_vec().unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(
        log.lock()
            .unwrap()
            .iter()
            .filter(|call| **call == "query")
            .count(),
        2
    );
}

#[tokio::test]
async fn find_async_filters() {
    let uow = unit_of_work(&seeded(&two_rows()));
    let read = uow.repository::<TestRow>().read;
    let cancel = CancellationToken::new();

    let rows = read.find_async(&named("Test1"), &cancel).await.unwrap();
    assert_eq!(rows, vec![TestRow::new(1, "Test1")]);

    let none = read.find_async(&named("nope"), &cancel).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn exists_reports_matches() {
    let uow = unit_of_work(&seeded(&two_rows()));
    let read = uow.repository::<TestRow>().read;
    let cancel = CancellationToken::new();

    assert!(read.exists(&named("Test1")).unwrap());
    assert!(!read.exists(&named("nope")).unwrap());
    assert!(read.exists_async(&named("Test2"), &cancel).await.unwrap());
    assert!(!read.exists_async(&named("nope"), &cancel).await.unwrap());
}

#[tokio::test]
async fn find_first_variants() {
    let rows = vec![
        TestRow::new(1, "Test1"),
        TestRow::new(2, "dup"),
        TestRow::new(3, "dup"),
    ];
    let uow = unit_of_work(&seeded(&rows));
    let read = uow.repository::<TestRow>().read;
    let cancel = CancellationToken::new();

    assert_eq!(read.find_first_or_fail(&named("dup")).unwrap().id, 2);
    assert_eq!(read.find_first(&named("dup")).unwrap().map(|r| r.id), Some(2));
    assert_eq!(read.find_first(&named("nope")).unwrap(), None);

    let err = read.find_first_or_fail(&named("nope")).unwrap_err();
    assert_eq!(
        err,
        RepositoryError::NoMatch {
            collection: "test_rows"
        }
    );
    assert!(err.is_not_found());

    let found = read
        .find_first_or_fail_async(&named("Test1"), &cancel)
        .await
        .unwrap();
    assert_eq!(found.id, 1);
    assert!(read
        .find_first_async(&named("nope"), &cancel)
        .await
        .unwrap()
        .is_none());
    assert!(read
        .find_first_or_fail_async(&named("nope"), &cancel)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn count_with_and_without_filter() {
    let rows = vec![
        TestRow::new(1, "a"),
        TestRow::new(2, "b").disabled(),
        TestRow::new(3, "c"),
    ];
    let uow = unit_of_work(&seeded(&rows));
    let read = uow.repository::<TestRow>().read;
    let enabled = Filter::new(|row: &TestRow| row.is_enabled);

    assert_eq!(read.count(None).unwrap(), 3);
    assert_eq!(read.count(Some(&enabled)).unwrap(), 2);
    assert_eq!(
        read.count_async(Some(&enabled.negate()), &CancellationToken::new())
            .await
            .unwrap(),
        1
    );
}

#[test]
fn update_and_remove_take_effect_on_save() {
    let db = seeded(&two_rows());
    let uow = unit_of_work(&db);
    let pair = uow.repository::<TestRow>();

    let mut row = pair.read.get_by_id(&1).unwrap();
    row.data = Some("changed".into());
    pair.write.update(&row).unwrap();
    pair.write.remove(&TestRow::new(2, "Test2")).unwrap();

    // Staged only.
    assert_eq!(pair.read.get_by_id(&1).unwrap().data, None);
    assert_eq!(pair.read.count(None).unwrap(), 2);

    assert_eq!(uow.save_changes().unwrap(), 2);
    assert_eq!(pair.read.get_by_id(&1).unwrap().data.as_deref(), Some("changed"));
    assert!(pair.read.get_by_id(&2).unwrap_err().is_not_found());
}

#[test]
fn range_writes() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);
    let pair = uow.repository::<TestRow>();

    pair.write.add_range(&crate::support::numbered(4)).unwrap();
    uow.save_changes().unwrap();

    let renamed: Vec<TestRow> = pair
        .read
        .get_all()
        .unwrap()
        .into_iter()
        .map(|mut row| {
            row.name = format!("renamed-{}", row.id);
            row
        })
        .collect();
    pair.write.update_range(&renamed[..2]).unwrap();
    pair.write.remove_range(&renamed[2..]).unwrap();
    assert_eq!(uow.save_changes().unwrap(), 4);

    let names: Vec<String> = pair.read.get_all().unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["renamed-1", "renamed-2"]);
}

#[tokio::test]
async fn add_range_async_stages_every_entity() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);
    let cancel = CancellationToken::new();

    uow.repository::<TestRow>()
        .write
        .add_range_async(&two_rows(), &cancel)
        .await
        .unwrap();
    assert_eq!(uow.save_changes_async(&cancel).await.unwrap(), 2);
    assert_eq!(db.row_count::<TestRow>().unwrap(), 2);
}

#[test]
fn duplicate_add_fails_the_whole_save() {
    let db = seeded(&two_rows());
    let uow = unit_of_work(&db);
    let write = uow.repository::<TestRow>().write;

    write.add(&TestRow::new(3, "Test3")).unwrap();
    write.add(&TestRow::new(1, "again")).unwrap();

    let err = uow.save_changes().unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Store(StoreError::DuplicateKey { .. })
    ));
    assert_eq!(db.row_count::<TestRow>().unwrap(), 2);
}

#[test]
fn update_of_missing_row_fails() {
    let db = InMemoryDatabase::new();
    let uow = unit_of_work(&db);
    uow.repository::<TestRow>()
        .write
        .update(&TestRow::new(7, "ghost"))
        .unwrap();

    assert!(matches!(
        uow.save_changes().unwrap_err(),
        RepositoryError::Store(StoreError::MissingRow { .. })
    ));
}

#[tokio::test]
async fn cancelled_token_stops_async_reads_and_writes() {
    let db = seeded(&two_rows());
    let uow = unit_of_work(&db);
    let pair = uow.repository::<TestRow>();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let cancelled = RepositoryError::Store(StoreError::Cancelled);
    assert_eq!(pair.read.get_all_async(&cancel).await.unwrap_err(), cancelled);
    assert_eq!(
        pair.read.get_by_id_async(&1, &cancel).await.unwrap_err(),
        cancelled
    );
    assert_eq!(
        pair.write
            .add_async(&TestRow::new(3, "Test3"), &cancel)
            .await
            .unwrap_err(),
        cancelled
    );
    assert_eq!(uow.save_changes_async(&cancel).await.unwrap_err(), cancelled);
    assert_eq!(db.row_count::<TestRow>().unwrap(), 2);
}
