use crate::cli::parser::{Commands, TypesAction};
use crate::errors::{AppError, AppResult};
use crate::store::Store;
use crate::ui::messages::{confirm, info, success};
use crate::views::SettingsView;

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    let Commands::Types { action } = cmd else {
        return Ok(());
    };
    let view = SettingsView::new(store)?;

    match action {
        TypesAction::List => print!("{}", view.render()),

        TypesAction::Add {
            name,
            numeric,
            color,
        } => {
            let added = view.add_type(store, name, *numeric, color.as_deref())?;
            success(format!(
                "Event type #{} '{}' added ({})",
                added.id,
                added.name,
                added.kind_label()
            ));
        }

        TypesAction::Del { id, yes } => {
            let lookup = store.event_type(*id)?;
            let Some(existing) = lookup.found() else {
                return Err(AppError::EventTypeNotFound(format!("#{id}")));
            };
            let prompt = format!(
                "Delete event type #{} '{}'? Its events are kept and shown as Unknown.",
                id, existing.name
            );
            if !*yes && !confirm(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = view.delete_type(store, *id)?;
            success(format!("Event type #{} '{}' deleted.", removed.id, removed.name));
        }
    }
    Ok(())
}
