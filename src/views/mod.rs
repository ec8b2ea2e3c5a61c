//! Read models behind the four screens.
//!
//! Each view keeps its data in `LiveQuery`s, so a mutation made from any
//! screen refreshes every open view before the next render.

pub mod history;
pub mod recent;
pub mod register;
pub mod settings;

pub use history::HistoryView;
pub use recent::RecentView;
pub use register::RegisterView;
pub use settings::SettingsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Register,
    History,
    Recent,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Register, Tab::History, Tab::Recent, Tab::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Register => "Register",
            Tab::History => "History",
            Tab::Recent => "Recent",
            Tab::Settings => "Settings",
        }
    }

    /// Accepts the label (any case), its first letter or the 1-based index.
    pub fn parse(s: &str) -> Option<Tab> {
        let s = s.trim().to_lowercase();
        Tab::ALL.iter().enumerate().find_map(|(i, tab)| {
            let label = tab.label().to_lowercase();
            let hit = s == label
                || s == (i + 1).to_string()
                || (s.len() == 1 && label.starts_with(&s));
            hit.then_some(*tab)
        })
    }
}
