use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for lifetracker
/// Habit and event logger backed by SQLite
#[derive(Parser)]
#[command(
    name = "lifetracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small habit logger: define event types, log occurrences per day, review history",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log one occurrence of an event type
    Register {
        /// Event type id or name (case-insensitive)
        event_type: String,

        /// Value for numeric types
        #[arg(long = "value", short = 'v', allow_hyphen_values = true)]
        value: Option<String>,

        /// Day to attribute the event to (YYYY-MM-DD, default today)
        #[arg(long = "day", short = 'd')]
        day: Option<String>,
    },

    /// Show the month calendar and, optionally, one day in detail
    History {
        /// Month to show (YYYY-MM, default current month)
        #[arg(long = "month", short = 'm')]
        month: Option<String>,

        /// Day to show in detail (YYYY-MM-DD or "today")
        #[arg(long = "day", short = 'd')]
        day: Option<String>,
    },

    /// List events, newest first
    Recent {
        /// Only events of this type (id or name)
        #[arg(long = "type", short = 't')]
        event_type: Option<String>,

        /// Maximum number of rows
        #[arg(long = "limit", short = 'n')]
        limit: Option<usize>,
    },

    /// Delete an event by id
    Del {
        /// Event id
        id: i64,

        /// Do not ask for confirmation
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Manage event types
    Types {
        #[command(subcommand)]
        action: TypesAction,
    },

    /// Export all data (json) or an event report (csv)
    Export {
        /// Output file
        #[arg(long = "file")]
        file: String,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Day range for csv: all, YYYY, YYYY-MM, YYYY-MM-DD or A:B
        #[arg(long = "range")]
        range: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(long = "force")]
        force: bool,
    },

    /// Replace all data with the content of a JSON export
    Import {
        /// Input file
        #[arg(long = "file")]
        file: String,

        /// Do not ask for confirmation
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Interactive shell with the Register, History, Recent and Settings tabs
    Shell,
}

#[derive(Subcommand)]
pub enum TypesAction {
    /// List event types
    List,

    /// Add an event type
    Add {
        /// Display name
        #[arg(long = "name")]
        name: String,

        /// Events of this type carry an integer value
        #[arg(long = "numeric")]
        numeric: bool,

        /// Palette name (blue, red, ...) or #rrggbb
        #[arg(long = "color")]
        color: Option<String>,
    },

    /// Delete an event type (its events are kept)
    Del {
        /// Event type id
        id: i64,

        /// Do not ask for confirmation
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}
