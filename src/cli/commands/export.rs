use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::store::Store;
use crate::views::SettingsView;

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::Export {
        file,
        format,
        range,
        force,
    } = cmd
    {
        let view = SettingsView::new(store)?;
        view.export(store, *format, file, range.as_deref(), *force)?;
    }
    Ok(())
}
