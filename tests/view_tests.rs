use lifetracker::core::calendar::MonthCalendar;
use lifetracker::core::seed::seed_default_event_types;
use lifetracker::errors::AppError;
use lifetracker::export::{ExportFormat, parse_range};
use lifetracker::models::{Event, NewEvent};
use lifetracker::store::Store;
use lifetracker::views::recent::{NO_EVENTS_MSG, NO_EVENTS_OF_TYPE_MSG};
use lifetracker::views::{HistoryView, RecentView, RegisterView, SettingsView, Tab};
use std::fs;

mod common;
use common::{day, temp_out};

fn seeded() -> Store {
    let store = Store::open_in_memory().unwrap();
    seed_default_event_types(&store).unwrap();
    store
}

fn ev(id: i64, d: &str) -> Event {
    Event {
        id,
        type_id: 1,
        day: day(d),
        created_at: format!("{d}T10:00:00.000Z"),
        value: None,
    }
}

#[test]
fn test_month_calendar_layout() {
    let events = vec![ev(1, "2024-03-01"), ev(2, "2024-03-01"), ev(3, "2024-03-15"), ev(4, "2024-04-01")];
    let cal = MonthCalendar::build(2024, 3, &events, day("2024-03-15"));

    // 1 March 2024 is a Friday.
    assert_eq!(cal.start_padding, 5);
    assert_eq!(cal.days.len(), 31);
    assert_eq!(cal.days[0].events, 2);
    assert_eq!(cal.days[14].events, 1);
    assert!(cal.days[14].is_today);
    assert_eq!(cal.days_with_events(), 2);

    let weeks = cal.weeks();
    assert_eq!(weeks.len(), 6);
    assert!(weeks.iter().all(|w| w.len() == 7));
    assert!(weeks[0][4].is_none());
    assert_eq!(weeks[0][5].unwrap().date, day("2024-03-01"));

    let feb = MonthCalendar::build(2024, 2, &[], day("2024-03-15"));
    assert_eq!(feb.days.len(), 29);
    assert_eq!(feb.days_with_events(), 0);
}

#[test]
fn test_register_view_feedback() {
    let store = seeded();
    let mut view = RegisterView::new(&store).unwrap();
    view.set_day(day("2024-03-01"));
    assert_eq!(view.types().len(), 4);

    view.register(&store, "Exercise", None).unwrap();
    assert_eq!(view.feedback(), Some("Exercise logged!"));

    assert!(view.register(&store, "Water (glasses)", Some("")).is_err());
    assert_eq!(view.feedback(), Some("Please enter a value"));
    assert_eq!(store.count_events().unwrap(), 1);

    let rendered = view.render();
    assert!(rendered.contains("Friday, March 1, 2024"));
    assert!(rendered.contains("Sleep (hours)"));
}

#[test]
fn test_views_share_live_data() {
    let store = seeded();
    let register = RegisterView::new(&store).unwrap();
    let settings = SettingsView::new(&store).unwrap();

    settings.add_type(&store, "Reading", false, Some("orange")).unwrap();

    assert_eq!(register.types().len(), 5);
    assert_eq!(register.live().version(), 1);
    assert!(settings.render().contains("orange"));

    let err = settings.add_type(&store, "", false, None).unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "Please enter a name"));
    assert_eq!(register.types().len(), 5);
}

#[test]
fn test_history_view_navigation_and_details() {
    let store = seeded();
    let mut register = RegisterView::new(&store).unwrap();
    let mut history = HistoryView::new(&store).unwrap();

    register.set_day(day("2024-03-01"));
    register.register(&store, "Exercise", None).unwrap();
    register.register(&store, "Sleep (hours)", Some("7")).unwrap();

    history.set_month(2024, 3);
    assert_eq!(history.calendar().days[0].events, 2);

    history.select_day(day("2024-03-01"));
    let details = history.day_details();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].1.name(), "Exercise");
    assert_eq!(details[1].0.value, Some(7));
    assert!(history.render().contains("Friday, March 1, 2024"));

    // Same day again clears the selection.
    history.select_day(day("2024-03-01"));
    assert_eq!(history.selected(), None);
    assert!(history.day_details().is_empty());

    history.set_month(2024, 1);
    history.prev_month();
    assert_eq!(history.month(), (2023, 12));
    history.next_month();
    history.next_month();
    assert_eq!(history.month(), (2024, 2));

    // Selecting a day of another month moves the cursor.
    history.select_day(day("2024-03-01"));
    assert_eq!(history.month(), (2024, 3));
}

#[test]
fn test_history_shows_unknown_for_deleted_type() {
    let store = seeded();
    let mut register = RegisterView::new(&store).unwrap();
    let settings = SettingsView::new(&store).unwrap();
    let mut history = HistoryView::new(&store).unwrap();

    register.set_day(day("2024-03-01"));
    register.register(&store, "Meditation", None).unwrap();
    settings.delete_type(&store, 2).unwrap();

    history.select_day(day("2024-03-01"));
    let details = history.day_details();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].1.name(), "Unknown");
    assert!(details[0].1.found().is_none());
}

#[test]
fn test_recent_view_order_filter_and_empty_states() {
    let store = seeded();
    let mut recent = RecentView::new(&store).unwrap();
    assert_eq!(recent.render().trim(), NO_EVENTS_MSG);

    for (type_id, d, at) in [
        (1, "2024-03-01", "2024-03-01T08:00:00.000Z"),
        (2, "2024-03-01", "2024-03-01T09:00:00.000Z"),
        (1, "2024-02-20", "2024-03-02T07:00:00.000Z"),
    ] {
        store
            .add_event(&NewEvent {
                type_id,
                day: day(d),
                created_at: at.to_string(),
                value: None,
            })
            .unwrap();
    }

    let ids: Vec<i64> = recent.rows().iter().map(|(e, _)| e.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    recent.set_filter_by("exercise").unwrap();
    let ids: Vec<i64> = recent.rows().iter().map(|(e, _)| e.id).collect();
    assert_eq!(ids, vec![3, 1]);

    recent.set_limit(Some(1));
    assert_eq!(recent.rows().len(), 1);
    recent.set_limit(None);

    recent.set_filter_by("Sleep (hours)").unwrap();
    assert!(recent.rows().is_empty());
    assert_eq!(recent.render().trim(), NO_EVENTS_OF_TYPE_MSG);

    recent.set_filter_by("all").unwrap();
    assert_eq!(recent.filter(), None);
    assert!(recent.render().contains("Meditation"));
}

#[test]
fn test_tab_parsing() {
    assert_eq!(Tab::parse("history"), Some(Tab::History));
    assert_eq!(Tab::parse("S"), Some(Tab::Settings));
    assert_eq!(Tab::parse("3"), Some(Tab::Recent));
    assert_eq!(Tab::parse("calendar"), None);
}

#[test]
fn test_parse_range_forms() {
    assert_eq!(
        parse_range("2024").unwrap(),
        (day("2024-01-01"), day("2024-12-31"))
    );
    assert_eq!(
        parse_range("2024-02").unwrap(),
        (day("2024-02-01"), day("2024-02-29"))
    );
    assert_eq!(
        parse_range("2024-01:2024-03").unwrap(),
        (day("2024-01-01"), day("2024-03-31"))
    );
    assert!(parse_range("2024:2024-03").is_err());
    assert!(parse_range("2024-03-02:2024-03-01").is_err());
    assert!(parse_range("24-1").is_err());
}

#[test]
fn test_settings_csv_export_with_range() {
    let store = seeded();
    let mut register = RegisterView::new(&store).unwrap();
    let settings = SettingsView::new(&store).unwrap();

    register.set_day(day("2024-03-01"));
    register.register(&store, "Exercise", None).unwrap();
    register.set_day(day("2024-04-01"));
    register.register(&store, "Water (glasses)", Some("4")).unwrap();
    settings.delete_type(&store, 1).unwrap();

    let out = temp_out("view_settings_csv", "csv");
    settings
        .export(&store, ExportFormat::Csv, &out, Some("2024-03"), true)
        .unwrap();

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "id,day,type,value,created_at");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("1,2024-03-01,Unknown,,"));

    // A ranged JSON export could not be restored: refused.
    let json_out = temp_out("view_settings_json", "json");
    assert!(
        settings
            .export(&store, ExportFormat::Json, &json_out, Some("2024"), true)
            .is_err()
    );
}

#[test]
fn test_empty_csv_report_keeps_header() {
    let store = seeded();
    let settings = SettingsView::new(&store).unwrap();

    let out = temp_out("view_settings_csv_empty", "csv");
    settings
        .export(&store, ExportFormat::Csv, &out, Some("1999"), true)
        .unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.trim_end(), "id,day,type,value,created_at");
}
