use crate::cli::parser::Commands;
use crate::core::del::DeleteLogic;
use crate::errors::{AppError, AppResult};
use crate::store::Store;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let Some(event) = store.event(*id)? else {
            return Err(AppError::EventNotFound(*id));
        };
        let type_name = store.event_type(event.type_id)?.name().to_string();

        let prompt = format!(
            "Delete event #{} ({} on {})? This action is irreversible.",
            id,
            type_name,
            event.day_str()
        );
        if !*yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        DeleteLogic::apply(store, *id)?;
        success(format!("Event #{} has been deleted.", id));
    }

    Ok(())
}
