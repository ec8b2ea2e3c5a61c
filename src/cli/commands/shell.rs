//! Interactive root shell: one tab visible at a time, every tab kept live.
//!
//! Each view registers a render hook on its live queries. A mutation made
//! from any tab marks the screen dirty and the active tab is drawn again
//! before the next prompt.

use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::core::register::resolve_type;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::store::Store;
use crate::ui::messages::{confirm, error, header, info, success};
use crate::utils::date::{parse_day_arg, parse_month};
use crate::views::{HistoryView, RecentView, RegisterView, SettingsView, Tab};
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

const HELP: &str = "\
Commands:
  tab <register|history|recent|settings|1-4>   switch tab
  reg <type> [value]                           log an event (Register)
  day <YYYY-MM-DD|today>                       log day (Register) / select day (History)
  month <prev|next|YYYY-MM>                    move the calendar (History)
  filter <type|all>                            filter by type (Recent)
  del <event-id>                               delete an event
  type add <name> [--numeric] [--color <c>]    add an event type (Settings)
  type del <id>                                delete an event type (Settings)
  export <file> [csv]                          export data (Settings)
  import <file>                                replace all data (Settings)
  help | quit";

enum Outcome {
    Redraw,
    Stay,
    Quit,
}

fn mark_dirty<T>(dirty: &Rc<Cell<bool>>) -> impl FnMut(&T) + 'static {
    let dirty = Rc::clone(dirty);
    move |_| dirty.set(true)
}

struct Shell<'a> {
    store: &'a Store,
    tab: Tab,
    register: RegisterView,
    history: HistoryView,
    recent: RecentView,
    settings: SettingsView,
    dirty: Rc<Cell<bool>>,
}

impl<'a> Shell<'a> {
    fn new(store: &'a Store, cfg: &Config) -> AppResult<Self> {
        let register = RegisterView::new(store)?;
        let history = HistoryView::new(store)?;
        let mut recent = RecentView::new(store)?;
        let settings = SettingsView::new(store)?;

        recent.set_limit(cfg.recent_limit);
        recent.set_show_weekday(cfg.show_weekday);

        let dirty = Rc::new(Cell::new(false));
        register.live().on_change(mark_dirty(&dirty));
        history.events().on_change(mark_dirty(&dirty));
        history.types().on_change(mark_dirty(&dirty));
        recent.events().on_change(mark_dirty(&dirty));
        recent.types().on_change(mark_dirty(&dirty));
        settings.live().on_change(mark_dirty(&dirty));

        Ok(Self {
            store,
            tab: Tab::Register,
            register,
            history,
            recent,
            settings,
            dirty,
        })
    }

    fn draw(&mut self) {
        self.dirty.set(false);

        let tabs: Vec<String> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if *t == self.tab {
                    format!("[{} {}]", i + 1, t.label())
                } else {
                    format!(" {} {} ", i + 1, t.label())
                }
            })
            .collect();

        println!();
        header(tabs.join(" "));
        let body = match self.tab {
            Tab::Register => self.register.render(),
            Tab::History => self.history.render(),
            Tab::Recent => self.recent.render(),
            Tab::Settings => self.settings.render(),
        };
        print!("{}", body);
        self.register.clear_feedback();
    }

    fn execute(&mut self, line: &str) -> AppResult<Outcome> {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match cmd.to_lowercase().as_str() {
            "" => Ok(Outcome::Stay),
            "help" | "?" => {
                println!("{HELP}");
                Ok(Outcome::Stay)
            }
            "quit" | "exit" | "q" => Ok(Outcome::Quit),

            "tab" => {
                self.tab = Tab::parse(rest)
                    .ok_or_else(|| AppError::Validation(format!("Unknown tab '{rest}'")))?;
                Ok(Outcome::Redraw)
            }

            "reg" => {
                self.tab = Tab::Register;
                self.register_line(rest)?;
                Ok(Outcome::Redraw)
            }

            "day" => {
                let day = parse_day_arg(rest)?;
                match self.tab {
                    Tab::History => self.history.select_day(day),
                    _ => {
                        self.tab = Tab::Register;
                        self.register.set_day(day);
                    }
                }
                Ok(Outcome::Redraw)
            }

            "month" => {
                self.tab = Tab::History;
                match rest {
                    "prev" | "p" => self.history.prev_month(),
                    "next" | "n" => self.history.next_month(),
                    m => {
                        let (y, m) = parse_month(m)?;
                        self.history.set_month(y, m);
                    }
                }
                Ok(Outcome::Redraw)
            }

            "filter" => {
                self.tab = Tab::Recent;
                self.recent.set_filter_by(rest)?;
                Ok(Outcome::Redraw)
            }

            "del" => {
                let id: i64 = rest
                    .trim_start_matches('#')
                    .parse()
                    .map_err(|_| AppError::Validation(format!("Invalid event id '{rest}'")))?;
                if confirm(&format!("Delete event #{id}?")) {
                    DeleteLogic::apply(self.store, id)?;
                    success(format!("Event #{id} deleted."));
                }
                Ok(Outcome::Stay)
            }

            "type" => {
                self.tab = Tab::Settings;
                self.type_line(rest)?;
                Ok(Outcome::Stay)
            }

            "export" => {
                let mut parts = rest.split_whitespace();
                let file = parts
                    .next()
                    .ok_or_else(|| AppError::Validation("Usage: export <file> [csv]".into()))?;
                let format = match parts.next() {
                    Some(f) if f.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
                    _ => ExportFormat::Json,
                };
                self.settings.export(self.store, format, file, None, false)?;
                Ok(Outcome::Stay)
            }

            "import" => {
                if rest.is_empty() {
                    return Err(AppError::Validation("Usage: import <file>".into()));
                }
                if confirm("Import replaces all event types and events. Continue?") {
                    let summary = self.settings.import_file(self.store, rest)?;
                    success(format!(
                        "Imported {} event types and {} events",
                        summary.event_types, summary.events
                    ));
                }
                Ok(Outcome::Stay)
            }

            other => Err(AppError::Validation(format!(
                "Unknown command '{other}' (type 'help')"
            ))),
        }
    }

    /// `reg <type> [value]`; a type name may contain spaces, so the last
    /// word is taken as the value only when the whole text is not a type.
    fn register_line(&mut self, rest: &str) -> AppResult<()> {
        if rest.is_empty() {
            return Err(AppError::Validation("Usage: reg <type> [value]".into()));
        }

        let whole_is_type = resolve_type(&self.register.types(), rest).is_ok();
        let (selector, value) = match rest.rsplit_once(' ') {
            Some((sel, val)) if !whole_is_type => (sel.trim(), Some(val)),
            _ => (rest, None),
        };

        self.register.register(self.store, selector, value)?;
        Ok(())
    }

    fn type_line(&mut self, rest: &str) -> AppResult<()> {
        let (action, args) = match rest.split_once(char::is_whitespace) {
            Some((a, r)) => (a, r.trim()),
            None => (rest, ""),
        };

        match action {
            "add" => {
                let mut numeric = false;
                let mut color = None;
                let mut name = Vec::new();

                let mut tokens = args.split_whitespace();
                while let Some(tok) = tokens.next() {
                    match tok {
                        "--numeric" => numeric = true,
                        "--color" => color = tokens.next(),
                        word => name.push(word),
                    }
                }

                let added = self
                    .settings
                    .add_type(self.store, &name.join(" "), numeric, color)?;
                success(format!("Event type #{} '{}' added", added.id, added.name));
            }
            "del" => {
                let id: i64 = args
                    .trim_start_matches('#')
                    .parse()
                    .map_err(|_| AppError::Validation(format!("Invalid type id '{args}'")))?;
                if confirm(&format!("Delete event type #{id}? Its events are kept.")) {
                    let removed = self.settings.delete_type(self.store, id)?;
                    success(format!("Event type '{}' deleted.", removed.name));
                }
            }
            _ => {
                return Err(AppError::Validation(
                    "Usage: type add <name> [--numeric] [--color <c>] | type del <id>".into(),
                ));
            }
        }
        Ok(())
    }
}

pub fn handle(store: &Store, cfg: &Config) -> AppResult<()> {
    let mut shell = Shell::new(store, cfg)?;
    info("lifetracker shell. Type 'help' for commands.");
    shell.draw();

    loop {
        print!("\nlifetracker> ");
        io::stdout().flush()?;

        // No lock held between prompts: `confirm` reads stdin too.
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let outcome = match shell.execute(line.trim()) {
            Ok(o) => o,
            Err(e) => {
                error(e);
                Outcome::Stay
            }
        };

        match outcome {
            Outcome::Quit => break,
            Outcome::Redraw => shell.draw(),
            Outcome::Stay if shell.dirty.get() => shell.draw(),
            Outcome::Stay => {}
        }
    }

    Ok(())
}
