//! Display colours for event types.
//!
//! Colours are stored as `#rrggbb` strings. The palette order matters: legacy
//! rows are backfilled with `PALETTE[id % PALETTE.len()]`.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

/// Fixed palette offered when creating an event type (name, hex).
pub const PALETTE: [(&str, &str); 8] = [
    ("blue", "#3b82f6"),
    ("red", "#ef4444"),
    ("green", "#22c55e"),
    ("amber", "#f59e0b"),
    ("violet", "#8b5cf6"),
    ("pink", "#ec4899"),
    ("cyan", "#06b6d4"),
    ("orange", "#f97316"),
];

/// Colour used when a type has none.
pub const DEFAULT_COLOR: &str = PALETTE[0].1;

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex colour regex"));

/// Deterministic palette entry for a legacy record without a colour.
pub fn palette_for_id(id: i64) -> &'static str {
    let idx = id.rem_euclid(PALETTE.len() as i64) as usize;
    PALETTE[idx].1
}

pub fn is_valid_hex(value: &str) -> bool {
    HEX_RE.is_match(value)
}

/// Accept a palette name (`green`) or a `#rrggbb` value.
pub fn parse_color(input: &str) -> AppResult<String> {
    let s = input.trim();

    if let Some((_, hex)) = PALETTE.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
        return Ok((*hex).to_string());
    }

    if is_valid_hex(s) {
        return Ok(s.to_ascii_lowercase());
    }

    let names: Vec<&str> = PALETTE.iter().map(|(n, _)| *n).collect();
    Err(AppError::Validation(format!(
        "Invalid color '{}'. Use #rrggbb or one of: {}",
        s,
        names.join(", ")
    )))
}

/// Split a valid `#rrggbb` into its RGB components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if !is_valid_hex(hex) {
        return None;
    }
    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
    Some((r, g, b))
}

/// Palette name for a hex value, if it is one of ours.
pub fn palette_name(hex: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(_, h)| h.eq_ignore_ascii_case(hex))
        .map(|(n, _)| *n)
}
