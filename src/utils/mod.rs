pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;

pub use date::today_string;
pub use formatting::{format_created_at, format_value};
