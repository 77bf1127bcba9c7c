use std::sync::Arc;

use tempfile::TempDir;

use sika_core::db::{self, DbPool, WriteHandle};
use sika_core::families::{Family, FamilyRepository, FamilyRepositoryTrait, NewFamily};

/// A fresh database for one test. Dropping the struct deletes the
/// backing directory, so keep it alive for the whole test.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _dir: TempDir,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let db_path =
        db::init(&dir.path().to_string_lossy()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let writer = db::write_actor::spawn_writer(pool.as_ref().clone());

    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub async fn create_test_family(db: &TestDb, name: &str) -> Family {
    let repository = FamilyRepository::new(db.pool.clone(), db.writer.clone());
    repository
        .create_family(NewFamily {
            id: None,
            name: name.to_string(),
            currency: None,
        })
        .await
        .expect("Failed to create family")
}
