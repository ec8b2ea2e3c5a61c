use lifetracker::db::queries::insert_event_row;
use lifetracker::models::{NewEvent, NewEventType, TypeLookup};
use lifetracker::store::{Collection, LiveQuery, Store};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

mod common;
use common::day;

fn event_at(type_id: i64, d: &str, created_at: &str, value: Option<i64>) -> NewEvent {
    NewEvent {
        type_id,
        day: day(d),
        created_at: created_at.to_string(),
        value,
    }
}

#[test]
fn test_event_types_are_listed_in_id_order() {
    let store = Store::open_in_memory().unwrap();

    let a = store
        .add_event_type(&NewEventType::new("Run", false, "#ef4444"))
        .unwrap();
    let b = store
        .add_event_type(&NewEventType::new("Pushups", true, "#22c55e"))
        .unwrap();
    assert!(b > a);

    let types = store.event_types().unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Run", "Pushups"]);
    assert!(types[1].is_numeric);
    assert_eq!(types[0].color.as_deref(), Some("#ef4444"));
}

#[test]
fn test_duplicate_type_names_are_allowed() {
    let store = Store::open_in_memory().unwrap();
    store
        .add_event_type(&NewEventType::new("Walk", false, "#ef4444"))
        .unwrap();
    store
        .add_event_type(&NewEventType::new("Walk", false, "#ef4444"))
        .unwrap();
    assert_eq!(store.count_event_types().unwrap(), 2);
}

#[test]
fn test_events_for_day_and_range() {
    let store = Store::open_in_memory().unwrap();

    store
        .add_event(&event_at(1, "2024-03-01", "2024-03-01T08:00:00.000Z", None))
        .unwrap();
    store
        .add_event(&event_at(2, "2024-03-02", "2024-03-02T08:00:00.000Z", Some(3)))
        .unwrap();
    store
        .add_event(&event_at(1, "2024-03-01", "2024-03-01T09:00:00.000Z", None))
        .unwrap();
    store
        .add_event(&event_at(1, "2024-04-01", "2024-04-01T09:00:00.000Z", None))
        .unwrap();

    let first = store.events_for_day(&day("2024-03-01")).unwrap();
    assert_eq!(first.len(), 2);
    assert!(first[0].id < first[1].id);

    let march = store
        .events_in_range(&day("2024-03-01"), &day("2024-03-31"))
        .unwrap();
    let days: Vec<String> = march.iter().map(|e| e.day_str()).collect();
    assert_eq!(days, vec!["2024-03-01", "2024-03-01", "2024-03-02"]);
    assert_eq!(march[2].value, Some(3));
}

#[test]
fn test_recent_events_newest_first_with_filter_and_limit() {
    let store = Store::open_in_memory().unwrap();

    let old = store
        .add_event(&event_at(1, "2024-03-01", "2024-03-01T08:00:00.000Z", None))
        .unwrap();
    let newest = store
        .add_event(&event_at(2, "2024-02-01", "2024-03-05T08:00:00.000Z", Some(1)))
        .unwrap();
    let middle = store
        .add_event(&event_at(1, "2024-03-03", "2024-03-03T08:00:00.000Z", None))
        .unwrap();

    let ids: Vec<i64> = store
        .recent_events(None, None)
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![newest, middle, old]);

    let only_one: Vec<i64> = store
        .recent_events(Some(1), None)
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(only_one, vec![middle, old]);

    assert_eq!(store.recent_events(None, Some(1)).unwrap().len(), 1);
}

#[test]
fn test_delete_type_keeps_events_and_lookup_is_unknown() {
    let store = Store::open_in_memory().unwrap();
    let t = store
        .add_event_type(&NewEventType::new("Yoga", false, "#8b5cf6"))
        .unwrap();
    store
        .add_event(&NewEvent::now(t, day("2024-03-01"), None))
        .unwrap();

    assert!(store.delete_event_type(t).unwrap());
    assert!(!store.delete_event_type(t).unwrap());

    assert_eq!(store.count_events().unwrap(), 1);
    let lookup = store.event_type(t).unwrap();
    assert_eq!(lookup, TypeLookup::Unknown(t));
    assert_eq!(lookup.name(), "Unknown");
    assert!(!lookup.color().is_empty());
}

#[test]
fn test_live_query_refreshes_after_each_mutation() {
    let store = Store::open_in_memory().unwrap();
    let events = LiveQuery::new(&store, &[Collection::Events], |s| s.events()).unwrap();

    assert_eq!(events.version(), 0);
    assert!(events.get().is_empty());

    let id = store
        .add_event(&NewEvent::now(1, day("2024-03-01"), None))
        .unwrap();
    assert_eq!(events.version(), 1);
    assert_eq!(events.get().len(), 1);

    // Another collection changed: no refresh.
    store
        .add_event_type(&NewEventType::new("Run", false, "#ef4444"))
        .unwrap();
    assert_eq!(events.version(), 1);

    assert!(store.delete_event(id).unwrap());
    assert_eq!(events.version(), 2);
    assert!(events.get().is_empty());
}

#[test]
fn test_live_query_not_refreshed_by_failed_mutation() {
    let store = Store::open_in_memory().unwrap();
    let id = store
        .add_event(&NewEvent::now(1, day("2024-03-01"), None))
        .unwrap();

    let events = LiveQuery::new(&store, &[Collection::Events], |s| s.events()).unwrap();

    // Deleting nothing is not a change.
    assert!(!store.delete_event(id + 100).unwrap());
    assert_eq!(events.version(), 0);

    // Duplicate primary key: the transaction fails and rolls back.
    let res = store.transaction(&[Collection::Events], |conn| {
        insert_event_row(
            conn,
            None,
            1,
            &day("2024-03-02"),
            "2024-03-02T08:00:00.000Z",
            None,
        )?;
        insert_event_row(
            conn,
            Some(id),
            1,
            &day("2024-03-03"),
            "2024-03-03T08:00:00.000Z",
            None,
        )?;
        Ok(())
    });
    assert!(res.is_err());
    assert_eq!(events.version(), 0);
    assert_eq!(store.count_events().unwrap(), 1);
}

#[test]
fn test_live_query_render_hook_receives_snapshot() {
    let store = Store::open_in_memory().unwrap();
    let types =
        LiveQuery::new(&store, &[Collection::EventTypes], |s| s.event_types()).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        types.on_change(move |list| seen.borrow_mut().push(list.len()));
    }

    store
        .add_event_type(&NewEventType::new("A", false, "#ef4444"))
        .unwrap();
    store
        .add_event_type(&NewEventType::new("B", true, "#22c55e"))
        .unwrap();

    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(types.snapshot().len(), 2);
}

#[test]
fn test_dropping_live_query_unsubscribes() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(store.listener_count(), 0);

    let q = LiveQuery::new(&store, &[Collection::Events], |s| s.count_events()).unwrap();
    assert_eq!(store.listener_count(), 1);

    drop(q);
    assert_eq!(store.listener_count(), 0);

    // Notifying after the drop must not reach the dead listener.
    store
        .add_event(&NewEvent::now(1, day("2024-03-01"), None))
        .unwrap();
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn test_subscribe_and_unsubscribe() {
    let store = Store::open_in_memory().unwrap();
    let hits = Rc::new(Cell::new(0));

    let sub = {
        let hits = Rc::clone(&hits);
        store.subscribe(Collection::EventTypes, move |_, c| {
            assert_eq!(c, Collection::EventTypes);
            hits.set(hits.get() + 1);
        })
    };

    store
        .add_event_type(&NewEventType::new("A", false, "#ef4444"))
        .unwrap();
    assert_eq!(hits.get(), 1);

    store.unsubscribe(sub);
    store
        .add_event_type(&NewEventType::new("B", false, "#ef4444"))
        .unwrap();
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_listener_that_mutates_is_not_reentered() {
    let store = Store::open_in_memory().unwrap();
    let calls = Rc::new(Cell::new(0));

    let _sub = {
        let calls = Rc::clone(&calls);
        store.subscribe(Collection::Events, move |s, _| {
            calls.set(calls.get() + 1);
            s.add_event(&NewEvent::now(99, day("2024-01-01"), None))
                .unwrap();
        })
    };

    let live = LiveQuery::new(&store, &[Collection::Events], |s| s.events()).unwrap();

    store
        .add_event(&NewEvent::now(1, day("2024-03-01"), None))
        .unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(store.count_events().unwrap(), 2);
    // Everyone else saw the nested insert too.
    assert_eq!(live.get().len(), 2);
}
