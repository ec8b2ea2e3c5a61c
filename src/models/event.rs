use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single logged occurrence of an event type on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,             // ⇔ events.id
    pub type_id: i64,        // ⇔ events.type_id (not enforced, may dangle)
    #[serde(with = "day_format")]
    pub day: NaiveDate,      // ⇔ events.day (TEXT "YYYY-MM-DD")
    pub created_at: String,  // ⇔ events.created_at (TEXT, RFC 3339 UTC)
    pub value: Option<i64>,  // ⇔ events.value (NULL for non-numeric types)
}

impl Event {
    pub fn day_str(&self) -> String {
        self.day.format(DAY_FORMAT).to_string()
    }
}

/// Payload for inserting a new event; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub type_id: i64,
    pub day: NaiveDate,
    pub created_at: String,
    pub value: Option<i64>,
}

impl NewEvent {
    /// Event recorded now, attributed to `day`.
    pub fn now(type_id: i64, day: NaiveDate, value: Option<i64>) -> Self {
        Self {
            type_id,
            day,
            created_at: now_timestamp(),
            value,
        }
    }
}

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Creation timestamp, e.g. `2024-03-01T08:15:42.120Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strict `YYYY-MM-DD` parsing: fixed width, real calendar date.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, DAY_FORMAT).ok()
}

pub(crate) mod day_format {
    use super::{DAY_FORMAT, parse_day};
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&day.format(DAY_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_day(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid day '{s}'")))
    }
}
