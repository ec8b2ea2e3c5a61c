//! Live queries: a query result kept current by re-running the query after
//! each successful mutation of the collections it watches.

use super::{Collection, Store, Subscription};
use crate::errors::AppResult;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

type RenderHook<T> = Box<dyn FnMut(&T)>;

struct LiveState<T> {
    data: T,
    version: u64,
    last_error: Option<String>,
    on_change: Option<RenderHook<T>>,
}

pub struct LiveQuery<T> {
    state: Rc<RefCell<LiveState<T>>>,
    query: Rc<dyn Fn(&Store) -> AppResult<T>>,
    _subscription: Subscription,
}

impl<T: 'static> LiveQuery<T> {
    /// Run `query` once now and again after every change to `watch`.
    pub fn new<Q>(store: &Store, watch: &[Collection], query: Q) -> AppResult<Self>
    where
        Q: Fn(&Store) -> AppResult<T> + 'static,
    {
        let query: Rc<dyn Fn(&Store) -> AppResult<T>> = Rc::new(query);

        let state = Rc::new(RefCell::new(LiveState {
            data: query(store)?,
            version: 0,
            last_error: None,
            on_change: None,
        }));

        let subscription = {
            let state = Rc::clone(&state);
            let query = Rc::clone(&query);
            store.subscribe_many(watch, move |store, _changed| {
                Self::apply(&state, query(store));
            })
        };

        Ok(Self {
            state,
            query,
            _subscription: subscription,
        })
    }

    fn apply(state: &RefCell<LiveState<T>>, result: AppResult<T>) {
        let mut guard = state.borrow_mut();
        let LiveState {
            data,
            version,
            last_error,
            on_change,
        } = &mut *guard;

        match result {
            Ok(fresh) => {
                *data = fresh;
                *version += 1;
                *last_error = None;
                if let Some(hook) = on_change.as_mut() {
                    hook(data);
                }
            }
            // Keep the previous snapshot; the failure is visible to the caller.
            Err(e) => *last_error = Some(e.to_string()),
        }
    }

    /// Latest delivered snapshot.
    pub fn get(&self) -> Ref<'_, T> {
        Ref::map(self.state.borrow(), |s| &s.data)
    }

    /// How many times the snapshot has been refreshed since creation.
    pub fn version(&self) -> u64 {
        self.state.borrow().version
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Called with the new snapshot after each refresh.
    pub fn on_change<F>(&self, hook: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.state.borrow_mut().on_change = Some(Box::new(hook));
    }

    /// Re-run the query without waiting for a mutation.
    pub fn refresh(&self, store: &Store) {
        Self::apply(&self.state, (self.query)(store));
    }
}

impl<T: Clone + 'static> LiveQuery<T> {
    pub fn snapshot(&self) -> T {
        self.get().clone()
    }
}
