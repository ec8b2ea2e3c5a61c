use crate::core::register::{Registered, RegisterLogic};
use crate::errors::{AppError, AppResult};
use crate::models::EventType;
use crate::store::{Collection, LiveQuery, Store};
use crate::utils::colors::swatch;
use crate::utils::date::{format_long, today};
use crate::utils::formatting::{bold, pad_right, visible_width};
use chrono::NaiveDate;
use std::cell::Ref;

/// One button per event type; picking one logs an event for `day`.
pub struct RegisterView {
    types: LiveQuery<Vec<EventType>>,
    day: NaiveDate,
    feedback: Option<String>,
}

impl RegisterView {
    pub fn new(store: &Store) -> AppResult<Self> {
        let types = LiveQuery::new(store, &[Collection::EventTypes], |s| s.event_types())?;
        Ok(Self {
            types,
            day: today(),
            feedback: None,
        })
    }

    pub fn types(&self) -> Ref<'_, Vec<EventType>> {
        self.types.get()
    }

    pub fn live(&self) -> &LiveQuery<Vec<EventType>> {
        &self.types
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn set_day(&mut self, day: NaiveDate) {
        self.day = day;
    }

    /// Last confirmation or validation message, until the next action.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// Log one event of the type picked by `selector` (id or name).
    pub fn register(
        &mut self,
        store: &Store,
        selector: &str,
        input: Option<&str>,
    ) -> AppResult<Registered> {
        let types = self.types.snapshot();

        match RegisterLogic::apply(store, &types, selector, input, self.day) {
            Ok(done) => {
                self.feedback = Some(done.feedback());
                Ok(done)
            }
            Err(e) => {
                if let AppError::Validation(msg) = &e {
                    self.feedback = Some(msg.clone());
                }
                Err(e)
            }
        }
    }

    pub fn render(&self) -> String {
        let types = self.types.get();
        let mut out = format!("{}\n\n", bold(&format!("Log for {}", format_long(&self.day))));

        if types.is_empty() {
            out.push_str("No event types yet. Add one in Settings.\n");
            return out;
        }

        let id_w = types
            .iter()
            .map(|t| t.id.to_string().len())
            .max()
            .unwrap_or(1);
        let name_w = types.iter().map(|t| visible_width(&t.name)).max().unwrap_or(4);

        for t in types.iter() {
            let hint = if t.is_numeric { "needs a value" } else { "" };
            out.push_str(&format!(
                "  [{:>id_w$}] {} {}  {}\n",
                t.id,
                swatch(t.resolved_color()),
                pad_right(&t.name, name_w),
                hint,
            ));
        }

        if let Some(msg) = &self.feedback {
            out.push('\n');
            out.push_str(msg);
            out.push('\n');
        }
        out
    }
}
