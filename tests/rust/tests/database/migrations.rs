//! Migration tests

use catalog_storage::Database;
use tests::db::TestDatabase;

#[test]
fn test_migrations_run_successfully() {
    // Database::open runs migrations automatically
    let test_db = TestDatabase::new();

    assert!(test_db.db_path().exists());
    assert!(test_db.path().is_dir());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = TestDatabase::new();

    // Opening the same database again should not fail or re-apply anything
    let db2 = Database::open(test_db.db_path()).expect("Failed to reopen database");
    assert_eq!(db2.schema_version().unwrap(), 1);
}

#[test]
fn test_database_creates_file_and_parent_dirs() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nested").join("catalog.db");

    assert!(!db_path.exists());

    let _db = Database::open(&db_path).expect("Failed to open database");

    assert!(db_path.exists());
}

#[test]
fn test_connect_understands_memory_url() {
    let db = Database::connect(catalog_storage::IN_MEMORY).expect("Failed to open in-memory database");
    assert_eq!(db.schema_version().unwrap(), 1);
}
