use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Shared handle to the SQLite connection. Diesel connections are not
/// `Sync`, so every round trip serializes through the mutex.
pub type Db = Arc<Mutex<SqliteConnection>>;

/// Opens the database and switches on foreign-key enforcement, which
/// SQLite leaves off per connection by default.
pub fn connect(database_url: &str) -> Result<Db, StorageError> {
    log::info!("Connecting to database at {}", database_url);
    let mut conn = SqliteConnection::establish(database_url)?;
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .map_err(StorageError::Database)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Applies any pending embedded migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StorageError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StorageError::Migration(err.to_string()))?;
    if applied.is_empty() {
        log::info!("No pending database migrations found");
    }
    for version in applied {
        log::info!("Applied migration {}", version);
    }
    Ok(())
}

/// Cheapest possible connectivity probe.
pub fn ping(conn: &mut SqliteConnection) -> Result<(), StorageError> {
    let result: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>("1"))
        .get_result(conn)
        .map_err(StorageError::Database)?;
    log::debug!("Database test query result: {}", result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_migrate_and_ping_in_memory() {
        let db = connect(":memory:").unwrap();
        let mut conn = db.lock().unwrap();
        run_migrations(&mut conn).unwrap();
        ping(&mut conn).unwrap();
    }

    #[test]
    fn migrations_are_idempotent() {
        let db = connect(":memory:").unwrap();
        let mut conn = db.lock().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();
    }
}
