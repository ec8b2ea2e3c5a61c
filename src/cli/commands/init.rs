use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::seed::seed_default_event_types;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database, with all pending migrations
///  - the default event types, when enabled
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing lifetracker…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_path);

    let store = Store::open(&db_path)?;

    if cfg.seed_defaults {
        let seeded = seed_default_event_types(&store)?;
        if seeded > 0 {
            println!("🌱 {} default event types created", seeded);
        }
    }

    if let Err(e) = ttlog(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", db_path));
    Ok(())
}
