use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine and
/// returns the schema version the file is at afterwards.
pub fn init_db(conn: &Connection) -> AppResult<u32> {
    conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
    run_pending_migrations(conn)
}
