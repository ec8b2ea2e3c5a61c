use crate::db::log::load_entries;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::info;
use crate::utils::formatting::{pad_right, strip_ansi, truncate};
use ansi_term::Colour;

/// Colour per audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "register" => Colour::Green,
        "del" | "type_del" => Colour::Red,
        "type_add" => Colour::Cyan,
        "import" | "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "seed" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

const OP_WIDTH_MAX: usize = 40;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &Store) -> AppResult<()> {
        let entries = load_entries(store.conn())?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or(e.date);

                let painted = color_for_operation(&e.operation).paint(&e.operation);
                let op_target = if e.target.is_empty() {
                    painted.to_string()
                } else {
                    format!("{} ({})", painted, truncate(&e.target, 24))
                };

                (e.id, date, op_target, e.message)
            })
            .collect();

        let id_w = rows
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let op_w = rows
            .iter()
            .map(|(_, _, op, _)| strip_ansi(op).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);

        println!("📜 Internal log:\n");

        for (id, date, op_target, message) in rows {
            println!(
                "{:>id_w$}: {} | {} => {}",
                id,
                date,
                pad_right(&op_target, op_w),
                message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
