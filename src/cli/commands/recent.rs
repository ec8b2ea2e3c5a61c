use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::Store;
use crate::views::RecentView;

pub fn handle(cmd: &Commands, store: &Store, cfg: &Config) -> AppResult<()> {
    if let Commands::Recent { event_type, limit } = cmd {
        let mut view = RecentView::new(store)?;
        view.set_show_weekday(cfg.show_weekday);
        view.set_limit(limit.or(cfg.recent_limit));

        if let Some(sel) = event_type {
            view.set_filter_by(sel)?;
        }

        print!("{}", view.render());
    }
    Ok(())
}
