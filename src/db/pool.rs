//! SQLite connection wrapper (one connection, single-user CLI).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(Path::new(path))?,
        })
    }

    /// Private in-memory database, gone when dropped.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}
