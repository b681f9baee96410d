//! Reference-counted global busy indicator.
//!
//! Any tracked async operation (login, logout, blockchain calls) brackets
//! itself with [`LoadingCoordinator::start`] / [`LoadingCoordinator::end`].
//! Subscribers only hear about the edges: one `true` when the count goes
//! 0→1, one `false` when it returns to 0. Single-threaded: clones share
//! the same counter, the UI event loop is the only caller, and there is
//! no locking.

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Handle returned by [`LoadingCoordinator::subscribe`]; pass it back to
/// [`LoadingCoordinator::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(bool)>;

#[derive(Default)]
struct Inner {
    active: usize,
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback)>,
    /// Ids unsubscribed while a notification pass had the list checked out.
    dead: Vec<SubscriberId>,
    /// Notification passes currently in flight. More than one happens
    /// when a subscriber flips the counter again from inside its
    /// callback, nesting a second pass inside the first.
    notify_depth: usize,
}

/// Counts outstanding async operations and tells subscribers when the
/// aggregate state flips between busy and idle.
#[derive(Clone, Default)]
pub struct LoadingCoordinator {
    inner: Rc<RefCell<Inner>>,
}

impl LoadingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one operation in flight. The 0→1 edge notifies subscribers
    /// with `true`; further increments are silent.
    pub fn start(&self) {
        let became_busy = {
            let mut inner = self.inner.borrow_mut();
            inner.active += 1;
            inner.active == 1
        };
        if became_busy {
            self.notify(true);
        }
    }

    /// Mark one operation finished. Floored at zero so unbalanced calls
    /// cannot drive the counter negative; the 1→0 edge notifies with
    /// `false`.
    pub fn end(&self) {
        let became_idle = {
            let mut inner = self.inner.borrow_mut();
            if inner.active == 0 {
                log::warn!("loading end() without a matching start()");
                false
            } else {
                inner.active -= 1;
                inner.active == 0
            }
        };
        if became_idle {
            self.notify(false);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().active > 0
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active
    }

    /// Register a callback for busy/idle edges. Callbacks run
    /// synchronously, in registration order.
    pub fn subscribe(&self, callback: impl FnMut(bool) + 'static) -> SubscriberId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = SubscriberId(inner.next_id);
        inner.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut inner = self.inner.borrow_mut();
        if inner.notify_depth > 0 {
            // The list is checked out by notify(); record the removal
            // and apply it when the outermost pass finishes.
            inner.dead.push(id);
        } else {
            inner.subscribers.retain(|(sid, _)| *sid != id);
        }
    }

    // The subscriber list is taken out of the cell while callbacks run,
    // so a callback may subscribe, unsubscribe, or query the counter
    // without hitting a double borrow. A panicking subscriber is logged
    // and the rest still run.
    fn notify(&self, busy: bool) {
        let mut current = {
            let mut inner = self.inner.borrow_mut();
            inner.notify_depth += 1;
            std::mem::take(&mut inner.subscribers)
        };

        for (id, callback) in current.iter_mut() {
            if catch_unwind(AssertUnwindSafe(|| callback(busy))).is_err() {
                log::error!("loading subscriber {id:?} panicked; continuing with the rest");
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.notify_depth -= 1;
        // Subscribers registered during the pass go after the existing
        // ones; they fire from the next edge onward.
        let added = std::mem::take(&mut inner.subscribers);
        current.extend(added);
        // A nested pass returns here while the outer one still holds
        // most of the list, so removals only apply once the outermost
        // pass is done.
        if inner.notify_depth == 0 {
            let dead = std::mem::take(&mut inner.dead);
            current.retain(|(sid, _)| !dead.contains(sid));
        }
        inner.subscribers = current;
    }
}
