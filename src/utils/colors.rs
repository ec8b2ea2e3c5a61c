//! ANSI color helper utilities for terminal output.
use crate::models::color::hex_to_rgb;
use ansi_term::Colour;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// A coloured block for an event-type colour (truecolor terminals).
pub fn swatch(hex: &str) -> String {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => Colour::RGB(r, g, b).paint("●").to_string(),
        None => format!("{GREY}○{RESET}"),
    }
}

/// Grey out placeholders such as "--".
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
