//! Versioned schema migrations.
//!
//! The schema version lives in SQLite's `PRAGMA user_version`. Each step runs
//! in its own transaction together with the version bump and an entry in the
//! `log` table, so a failed step leaves the file at the previous version.

use crate::errors::{AppError, AppResult};
use crate::models::color::palette_for_id;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, params};

/// Version written by the newest migration below.
pub const SCHEMA_VERSION: u32 = 2;

struct Migration {
    version: u32,
    name: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "v1_create_collections",
        description: "Created event_types and events tables",
        apply: create_collections,
    },
    Migration {
        version: 2,
        name: "v2_add_event_type_color",
        description: "Added color to event_types and backfilled legacy rows",
        apply: add_event_type_color,
    },
];

/// Ensure that the `log` table exists. It is not versioned: every schema
/// version needs it to record its own application.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

pub fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

fn set_schema_version(conn: &Connection, version: u32) -> rusqlite::Result<()> {
    // PRAGMA does not accept bound parameters.
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
}

/// v1: the two collections, no foreign key between them.
fn create_collections(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS event_types (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            is_numeric  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_event_types_name ON event_types(name);

        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            type_id     INTEGER NOT NULL,
            day         TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            value       INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_events_type_id ON events(type_id);
        CREATE INDEX IF NOT EXISTS idx_events_day ON events(day);
        CREATE INDEX IF NOT EXISTS idx_events_created_at ON events(created_at);
        "#,
    )
}

/// Check if `event_types` already has a `color` column.
fn event_types_has_color_column(conn: &Connection) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('event_types')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "color" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// v2: `color` column plus deterministic backfill.
fn add_event_type_color(conn: &Connection) -> rusqlite::Result<()> {
    if !event_types_has_color_column(conn)? {
        conn.execute_batch("ALTER TABLE event_types ADD COLUMN color TEXT;")?;
    }
    backfill_type_colors(conn)?;
    Ok(())
}

/// Give every type without a colour `PALETTE[id % len]`. Other columns are
/// not touched. Returns the number of rows updated.
pub fn backfill_type_colors(conn: &Connection) -> rusqlite::Result<usize> {
    let ids: Vec<i64> = {
        let mut stmt = conn.prepare(
            "SELECT id FROM event_types
             WHERE color IS NULL OR TRIM(color) = ''
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    let mut update = conn.prepare("UPDATE event_types SET color = ?1 WHERE id = ?2")?;
    for id in &ids {
        update.execute(params![palette_for_id(*id), id])?;
    }

    Ok(ids.len())
}

/// File backing the main database, or `None` for in-memory databases.
fn database_path(conn: &Connection) -> Option<String> {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .ok()
        .filter(|p| !p.is_empty())
}

/// Zip the database file next to itself before an upgrade touches it.
fn backup_before_migration(db_path: &str, target: u32) -> AppResult<std::path::PathBuf> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let src = Path::new(db_path);
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "database".to_string());

    let backup_name = format!(
        "{}-{}-pre_v{}.zip",
        stem,
        Local::now().format("%Y%m%d_%H%M%S"),
        target
    );
    let backup_path = src
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&backup_name);

    let zip_err = |stage: &str, e: zip::result::ZipError| {
        AppError::Migration(format!("Backup failed ({stage}): {e}"))
    };

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| zip_err("start_file", e))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;
    zip.finish().map_err(|e| zip_err("finish", e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(backup_path)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()`. Returns the resulting version.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<u32> {
    ensure_log_table(conn)?;

    let current = schema_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "database schema v{current} is newer than this build supports (v{SCHEMA_VERSION})"
        )));
    }

    if current == SCHEMA_VERSION {
        return Ok(current);
    }

    // Existing data is about to change shape → keep a copy first.
    if current >= 1 {
        warning(format!(
            "Schema v{current} detected, creating safety backup before upgrading to v{SCHEMA_VERSION}..."
        ));
        match database_path(conn) {
            Some(path) => {
                backup_before_migration(&path, SCHEMA_VERSION)?;
            }
            None => warning("In-memory database: backup skipped."),
        }
    }

    for m in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.unchecked_transaction()?;

        (m.apply)(&tx).map_err(|e| AppError::Migration(format!("{}: {}", m.name, e)))?;
        set_schema_version(&tx, m.version)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![chrono::Local::now().to_rfc3339(), m.name, m.description],
        )?;

        tx.commit()?;

        if current > 0 {
            success(format!("Migration applied: {} → {}", m.name, m.description));
        }
    }

    Ok(SCHEMA_VERSION)
}
