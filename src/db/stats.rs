use crate::db::migrate::schema_version;
use crate::db::queries::{count_event_types, count_events};
use crate::errors::AppResult;
use crate::models::event::parse_day;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE + SCHEMA
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);
    println!(
        "{}• Schema version:{} v{}",
        CYAN,
        RESET,
        schema_version(conn)?
    );

    //
    // 2) COUNTS
    //
    println!(
        "{}• Event types:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        count_event_types(conn)?,
        RESET
    );
    let count = count_events(conn)?;
    println!("{}• Events:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);

    //
    // 3) DAY RANGE
    //
    let first_day: Option<String> = conn
        .query_row("SELECT MIN(day) FROM events", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last_day: Option<String> = conn
        .query_row("SELECT MAX(day) FROM events", [], |row| row.get(0))
        .optional()?
        .flatten();

    let grey_dash = || format!("{GREY}--{RESET}");

    println!("{}• Day range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first_day.clone().unwrap_or_else(grey_dash)
    );
    println!("    to:   {}", last_day.clone().unwrap_or_else(grey_dash));

    //
    // 4) AVERAGE EVENTS/DAY
    //
    if let (Some(d1), Some(d2)) = (
        first_day.as_deref().and_then(parse_day),
        last_day.as_deref().and_then(parse_day),
    ) {
        let days = (d2 - d1).num_days() + 1;
        let avg = count as f64 / days as f64;
        println!("{}• Average events/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
