//! The persistent store: one SQLite connection, the two collections, and a
//! registry of listeners notified after every successful mutation.
//!
//! Everything runs on one thread. Listeners are held weakly: dropping the
//! `Subscription` (or the `LiveQuery` that owns it) unsubscribes.

pub mod live;

pub use live::LiveQuery;

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{Event, EventType, NewEvent, NewEventType, TypeLookup};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// The two independently versioned record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    EventTypes,
    Events,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::EventTypes, Collection::Events];
}

type Listener = RefCell<dyn FnMut(&Store, Collection)>;

struct ListenerEntry {
    id: u64,
    collections: Vec<Collection>,
    callback: Weak<Listener>,
}

/// Keeps a listener registered for as long as it lives.
pub struct Subscription {
    id: u64,
    _callback: Rc<Listener>,
}

pub struct Store {
    pool: DbPool,
    listeners: RefCell<Vec<ListenerEntry>>,
    next_id: Cell<u64>,
}

impl Store {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    // ---------------------------
    // Subscriptions
    // ---------------------------

    /// Call `callback` after every committed change to `collection`.
    ///
    /// Listeners are not re-entered: a listener that mutates the store from
    /// inside its callback is not called for that nested mutation, so any
    /// state it derives from the store may need an explicit refresh. Other
    /// listeners do see the nested change.
    pub fn subscribe<F>(&self, collection: Collection, callback: F) -> Subscription
    where
        F: FnMut(&Store, Collection) + 'static,
    {
        self.subscribe_many(&[collection], callback)
    }

    /// One listener for several collections. It is called once per
    /// mutation even when the mutation touched more than one of them.
    pub fn subscribe_many<F>(&self, collections: &[Collection], callback: F) -> Subscription
    where
        F: FnMut(&Store, Collection) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let rc: Rc<Listener> = Rc::new(RefCell::new(callback));

        self.listeners.borrow_mut().push(ListenerEntry {
            id,
            collections: collections.to_vec(),
            callback: Rc::downgrade(&rc),
        });

        Subscription { id, _callback: rc }
    }

    /// Explicit unsubscribe; equivalent to dropping the handle.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.listeners
            .borrow_mut()
            .retain(|l| l.id != subscription.id);
    }

    /// Number of listeners still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.callback.strong_count() > 0)
            .count()
    }

    /// Call every live listener interested in one of `changed`.
    fn notify(&self, changed: &[Collection]) {
        let targets: Vec<(Rc<Listener>, Collection)> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|l| l.callback.strong_count() > 0);

            listeners
                .iter()
                .filter_map(|l| {
                    let hit = changed.iter().find(|c| l.collections.contains(c))?;
                    Some((l.callback.upgrade()?, *hit))
                })
                .collect()
        }; // registry borrow released: callbacks may subscribe

        for (callback, collection) in targets {
            // A listener that mutates the store is not re-entered.
            if let Ok(mut f) = callback.try_borrow_mut() {
                (&mut *f)(self, collection);
            }
        }
    }

    /// Run `f` in one transaction; listeners of `changed` are notified only
    /// after the commit succeeds.
    pub fn transaction<T, F>(&self, changed: &[Collection], f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self.pool.conn.unchecked_transaction()?;
        let out = f(&tx)?;
        tx.commit()?;

        self.notify(changed);
        Ok(out)
    }

    /// Read-only transaction: `f` sees one consistent state of the file.
    pub fn read<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self.pool.conn.unchecked_transaction()?;
        let out = f(&tx)?;
        tx.finish()?;
        Ok(out)
    }

    // ---------------------------
    // Event types
    // ---------------------------

    pub fn add_event_type(&self, ty: &NewEventType) -> AppResult<i64> {
        let id = queries::insert_event_type(&self.pool.conn, ty)?;
        self.notify(&[Collection::EventTypes]);
        Ok(id)
    }

    /// Never cascades: events keep their `type_id`.
    pub fn delete_event_type(&self, id: i64) -> AppResult<bool> {
        let removed = queries::delete_event_type(&self.pool.conn, id)? > 0;
        if removed {
            self.notify(&[Collection::EventTypes]);
        }
        Ok(removed)
    }

    pub fn event_types(&self) -> AppResult<Vec<EventType>> {
        Ok(queries::load_event_types(&self.pool.conn)?)
    }

    pub fn event_type(&self, id: i64) -> AppResult<TypeLookup> {
        Ok(queries::load_event_type(&self.pool.conn, id)?
            .map_or(TypeLookup::Unknown(id), TypeLookup::Found))
    }

    pub fn count_event_types(&self) -> AppResult<i64> {
        Ok(queries::count_event_types(&self.pool.conn)?)
    }

    // ---------------------------
    // Events
    // ---------------------------

    pub fn add_event(&self, ev: &NewEvent) -> AppResult<i64> {
        let id = queries::insert_event(&self.pool.conn, ev)?;
        self.notify(&[Collection::Events]);
        Ok(id)
    }

    pub fn delete_event(&self, id: i64) -> AppResult<bool> {
        let removed = queries::delete_event(&self.pool.conn, id)? > 0;
        if removed {
            self.notify(&[Collection::Events]);
        }
        Ok(removed)
    }

    pub fn event(&self, id: i64) -> AppResult<Option<Event>> {
        Ok(queries::load_event(&self.pool.conn, id)?)
    }

    pub fn events(&self) -> AppResult<Vec<Event>> {
        Ok(queries::load_events(&self.pool.conn)?)
    }

    pub fn events_for_day(&self, day: &NaiveDate) -> AppResult<Vec<Event>> {
        Ok(queries::load_events_by_day(&self.pool.conn, day)?)
    }

    pub fn events_in_range(&self, from: &NaiveDate, to: &NaiveDate) -> AppResult<Vec<Event>> {
        Ok(queries::load_events_in_range(&self.pool.conn, from, to)?)
    }

    pub fn recent_events(
        &self,
        type_id: Option<i64>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Event>> {
        Ok(queries::load_recent_events(&self.pool.conn, type_id, limit)?)
    }

    pub fn count_events(&self) -> AppResult<i64> {
        Ok(queries::count_events(&self.pool.conn)?)
    }
}
