use super::color::{DEFAULT_COLOR, is_valid_hex};
use serde::{Deserialize, Serialize};

/// A user-defined category of trackable occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: i64,                // ⇔ event_types.id
    pub name: String,           // ⇔ event_types.name (duplicates allowed)
    pub is_numeric: bool,       // ⇔ event_types.is_numeric (0/1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>, // ⇔ event_types.color (NULL for unmigrated/imported rows)
}

impl EventType {
    /// Colour to display: the stored one, or the palette default.
    pub fn resolved_color(&self) -> &str {
        match self.color.as_deref() {
            Some(c) if is_valid_hex(c) => c,
            _ => DEFAULT_COLOR,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_numeric { "numeric" } else { "check" }
    }
}

/// Payload for inserting a new event type; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewEventType {
    pub name: String,
    pub is_numeric: bool,
    pub color: Option<String>,
}

impl NewEventType {
    pub fn new(name: impl Into<String>, is_numeric: bool, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_numeric,
            color: Some(color.into()),
        }
    }
}

/// Result of resolving an event's `type_id`.
///
/// Events keep their `type_id` after the type is deleted, so every display
/// path has to handle `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLookup {
    Found(EventType),
    Unknown(i64),
}

impl TypeLookup {
    pub const UNKNOWN_LABEL: &'static str = "Unknown";

    pub fn name(&self) -> &str {
        match self {
            TypeLookup::Found(t) => &t.name,
            TypeLookup::Unknown(_) => Self::UNKNOWN_LABEL,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            TypeLookup::Found(t) => t.resolved_color(),
            TypeLookup::Unknown(_) => DEFAULT_COLOR,
        }
    }

    pub fn found(&self) -> Option<&EventType> {
        match self {
            TypeLookup::Found(t) => Some(t),
            TypeLookup::Unknown(_) => None,
        }
    }

    /// Resolve against an in-memory snapshot (views work on snapshots).
    pub fn resolve(types: &[EventType], type_id: i64) -> Self {
        types
            .iter()
            .find(|t| t.id == type_id)
            .cloned()
            .map_or(TypeLookup::Unknown(type_id), TypeLookup::Found)
    }
}
