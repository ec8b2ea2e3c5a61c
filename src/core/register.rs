use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::{EventType, NewEvent};
use crate::store::Store;
use chrono::NaiveDate;

/// Shown when a numeric type is registered without a usable value.
pub const MISSING_VALUE_MSG: &str = "Please enter a value";

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registered {
    pub event_id: i64,
    pub event_type: EventType,
    pub day: NaiveDate,
    pub value: Option<i64>,
}

impl Registered {
    pub fn feedback(&self) -> String {
        format!("{} logged!", self.event_type.name)
    }
}

/// High-level business logic for registering an occurrence.
pub struct RegisterLogic;

impl RegisterLogic {
    /// Validate and store one event. Nothing is written when validation
    /// fails.
    pub fn apply(
        store: &Store,
        types: &[EventType],
        selector: &str,
        input: Option<&str>,
        day: NaiveDate,
    ) -> AppResult<Registered> {
        let event_type = resolve_type(types, selector)?;
        let value = parse_value(&event_type, input)?;

        let event_id = store.add_event(&NewEvent::now(event_type.id, day, value))?;

        ttlog_soft(
            store.conn(),
            "register",
            &event_type.name,
            &format!(
                "Event #{} on {}{}",
                event_id,
                day,
                value.map(|v| format!(" value={v}")).unwrap_or_default()
            ),
        );

        Ok(Registered {
            event_id,
            event_type,
            day,
            value,
        })
    }
}

/// Find a type by id or by case-insensitive name. Names are not unique, so
/// an ambiguous name is rejected.
pub fn resolve_type(types: &[EventType], selector: &str) -> AppResult<EventType> {
    let sel = selector.trim();

    if let Ok(id) = sel.trim_start_matches('#').parse::<i64>()
        && let Some(t) = types.iter().find(|t| t.id == id)
    {
        return Ok(t.clone());
    }

    let matches: Vec<&EventType> = types
        .iter()
        .filter(|t| t.name.eq_ignore_ascii_case(sel))
        .collect();

    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => Err(AppError::EventTypeNotFound(sel.to_string())),
        many => {
            let ids: Vec<String> = many.iter().map(|t| format!("#{}", t.id)).collect();
            Err(AppError::Validation(format!(
                "'{}' matches several event types ({}); use the id instead",
                sel,
                ids.join(", ")
            )))
        }
    }
}

/// Numeric types need a non-empty integer input; other types never carry a
/// value, whatever was typed.
pub fn parse_value(event_type: &EventType, input: Option<&str>) -> AppResult<Option<i64>> {
    if !event_type.is_numeric {
        return Ok(None);
    }

    let raw = input.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(AppError::Validation(MISSING_VALUE_MSG.to_string()));
    }

    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::Validation(MISSING_VALUE_MSG.to_string()))
}
