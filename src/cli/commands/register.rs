use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::success;
use crate::utils::date::parse_day_arg;
use crate::utils::formatting::format_value;
use crate::views::RegisterView;

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::Register {
        event_type,
        value,
        day,
    } = cmd
    {
        let mut view = RegisterView::new(store)?;
        if let Some(d) = day {
            view.set_day(parse_day_arg(d)?);
        }

        let done = view.register(store, event_type, value.as_deref())?;

        let detail = match done.value {
            Some(_) => format!(" ({})", format_value(done.value)),
            None => String::new(),
        };
        success(format!(
            "{}{} [#{} on {}]",
            done.feedback(),
            detail,
            done.event_id,
            done.day
        ));
    }
    Ok(())
}
