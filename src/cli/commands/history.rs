use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::store::Store;
use crate::utils::date::{parse_day_arg, parse_month};
use crate::views::HistoryView;

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::History { month, day } = cmd {
        let mut view = HistoryView::new(store)?;

        if let Some(m) = month {
            let (y, m) = parse_month(m)?;
            view.set_month(y, m);
        }
        if let Some(d) = day {
            view.select_day(parse_day_arg(d)?);
        }

        print!("{}", view.render());
    }
    Ok(())
}
