use lifetracker::core::register::{MISSING_VALUE_MSG, RegisterLogic, parse_value, resolve_type};
use lifetracker::core::seed::{DEFAULT_EVENT_TYPES, seed_default_event_types};
use lifetracker::core::types::{MISSING_NAME_MSG, TypeLogic};
use lifetracker::db::log::load_entries;
use lifetracker::errors::AppError;
use lifetracker::models::color::{is_valid_hex, parse_color};
use lifetracker::store::Store;
use lifetracker::utils::today_string;

mod common;
use common::day;

#[test]
fn test_seed_creates_four_defaults_once() {
    let store = Store::open_in_memory().unwrap();

    assert_eq!(seed_default_event_types(&store).unwrap(), 4);
    assert_eq!(seed_default_event_types(&store).unwrap(), 0);

    let types = store.event_types().unwrap();
    assert_eq!(types.len(), 4);

    for (t, (name, numeric, color)) in types.iter().zip(DEFAULT_EVENT_TYPES) {
        assert_eq!(t.name, name);
        assert_eq!(t.is_numeric, numeric);
        assert_eq!(t.color.as_deref(), Some(color));
    }
}

#[test]
fn test_seed_skipped_when_any_type_exists() {
    let store = Store::open_in_memory().unwrap();
    TypeLogic::add(&store, "Reading", false, None).unwrap();

    assert_eq!(seed_default_event_types(&store).unwrap(), 0);
    assert_eq!(store.count_event_types().unwrap(), 1);
}

#[test]
fn test_register_numeric_without_value_stores_nothing() {
    let store = Store::open_in_memory().unwrap();
    let water = TypeLogic::add(&store, "Water (glasses)", true, None).unwrap();
    let types = store.event_types().unwrap();

    for input in [None, Some(""), Some("   "), Some("abc"), Some("2.5")] {
        let err = RegisterLogic::apply(&store, &types, "Water (glasses)", input, day("2024-03-01"))
            .unwrap_err();
        assert!(
            matches!(&err, AppError::Validation(m) if m == MISSING_VALUE_MSG),
            "input {input:?} gave {err}"
        );
    }
    assert_eq!(store.count_events().unwrap(), 0);

    let ok = RegisterLogic::apply(&store, &types, &water.id.to_string(), Some(" 8 "), day("2024-03-01"))
        .unwrap();
    assert_eq!(ok.value, Some(8));
    assert_eq!(ok.feedback(), "Water (glasses) logged!");
    assert_eq!(store.count_events().unwrap(), 1);
}

#[test]
fn test_register_check_type_ignores_input() {
    let store = Store::open_in_memory().unwrap();
    seed_default_event_types(&store).unwrap();
    let types = store.event_types().unwrap();

    let done = RegisterLogic::apply(&store, &types, "exercise", Some("42"), day("2024-03-01")).unwrap();
    assert_eq!(done.value, None);
    assert_eq!(done.feedback(), "Exercise logged!");

    let ev = store.event(done.event_id).unwrap().unwrap();
    assert_eq!(ev.value, None);
    assert_eq!(ev.day_str(), "2024-03-01");
    assert!(ev.created_at.ends_with('Z'));

    let log = load_entries(store.conn()).unwrap();
    assert!(log.iter().any(|e| e.operation == "register" && e.target == "Exercise"));
}

#[test]
fn test_resolve_type_by_id_name_and_ambiguity() {
    let store = Store::open_in_memory().unwrap();
    let a = TypeLogic::add(&store, "Walk", false, None).unwrap();
    let b = TypeLogic::add(&store, "walk", false, None).unwrap();
    TypeLogic::add(&store, "Swim", false, None).unwrap();
    let types = store.event_types().unwrap();

    assert_eq!(resolve_type(&types, "SWIM").unwrap().name, "Swim");
    assert_eq!(resolve_type(&types, &format!("#{}", b.id)).unwrap().id, b.id);
    assert_eq!(resolve_type(&types, &a.id.to_string()).unwrap().id, a.id);

    assert!(matches!(
        resolve_type(&types, "Walk"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        resolve_type(&types, "Climb"),
        Err(AppError::EventTypeNotFound(_))
    ));
}

#[test]
fn test_parse_value_rules() {
    let store = Store::open_in_memory().unwrap();
    let numeric = TypeLogic::add(&store, "Sleep (hours)", true, None).unwrap();
    let check = TypeLogic::add(&store, "Meditation", false, None).unwrap();

    assert_eq!(parse_value(&numeric, Some("-3")).unwrap(), Some(-3));
    assert!(parse_value(&numeric, Some("7h")).is_err());
    assert_eq!(parse_value(&check, Some("anything")).unwrap(), None);
    assert_eq!(parse_value(&check, None).unwrap(), None);
}

#[test]
fn test_add_type_validation_and_colours() {
    let store = Store::open_in_memory().unwrap();

    let err = TypeLogic::add(&store, "   ", false, None).unwrap_err();
    assert!(matches!(&err, AppError::Validation(m) if m == MISSING_NAME_MSG));

    assert!(TypeLogic::add(&store, "Bad", false, Some("purple-ish")).is_err());
    assert_eq!(store.count_event_types().unwrap(), 0);

    let named = TypeLogic::add(&store, "  Reading ", false, Some("green")).unwrap();
    assert_eq!(named.name, "Reading");
    assert_eq!(named.color.as_deref(), Some("#22c55e"));

    let hex = TypeLogic::add(&store, "Steps", true, Some("#ABCDEF")).unwrap();
    assert_eq!(hex.color.as_deref(), Some("#abcdef"));

    let default = TypeLogic::add(&store, "Plain", false, None).unwrap();
    assert!(is_valid_hex(default.resolved_color()));
}

#[test]
fn test_delete_type_keeps_event_count() {
    let store = Store::open_in_memory().unwrap();
    seed_default_event_types(&store).unwrap();
    let types = store.event_types().unwrap();

    RegisterLogic::apply(&store, &types, "Exercise", None, day("2024-03-01")).unwrap();
    RegisterLogic::apply(&store, &types, "Meditation", None, day("2024-03-01")).unwrap();
    let before = store.count_events().unwrap();

    let removed = TypeLogic::delete(&store, types[0].id).unwrap();
    assert_eq!(removed.name, "Exercise");
    assert_eq!(store.count_events().unwrap(), before);

    assert!(matches!(
        TypeLogic::delete(&store, types[0].id),
        Err(AppError::EventTypeNotFound(_))
    ));
}

#[test]
fn test_parse_color_accepts_palette_names_case_insensitive() {
    assert_eq!(parse_color("Violet").unwrap(), "#8b5cf6");
    assert!(parse_color("#12345").is_err());
}

#[test]
fn test_today_string_is_local_day_zero_padded() {
    let s = today_string();
    assert_eq!(s.len(), 10);
    assert_eq!(&s[4..5], "-");
    assert_eq!(&s[7..8], "-");
    assert!(s.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
    assert_eq!(day(&s), chrono::Local::now().date_naive());
}
