//! Navigation state machine.
//!
//! Owns the single current-path value and mediates every transition
//! (programmatic `navigate` calls and browser back/forward events) by
//! running each requested path through the route policy gate before
//! committing it. A two-state machine (`Idle`/`Transitioning`) drops the
//! re-entrant history events a committed redirect can fire, which is
//! what prevents redirect loops.
//!
//! The controller is an explicit dependency: hosts pass it (or a wrapper
//! around it) to whatever needs to navigate. There is no process-global
//! `navigate` function.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::auth::TokenStore;
use crate::gate::RoutePolicy;

/// Browser-history seam. Pushing adds an entry, replacing rewrites the
/// current one; neither reloads the page.
pub trait HistorySink {
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
}

/// Where the controller is in its transition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Transitioning,
}

#[derive(Clone)]
pub struct NavigationController {
    inner: Rc<NavInner>,
}

struct NavInner {
    policy: RoutePolicy,
    store: TokenStore,
    history: Rc<dyn HistorySink>,
    phase: Cell<NavPhase>,
    current: RefCell<String>,
}

impl NavigationController {
    /// Build the controller from the path the application loaded with.
    /// The initial path goes through the gate once before first render;
    /// a redirect rewrites the current history entry instead of adding
    /// one, so "back" still leaves the app.
    pub fn new(
        policy: RoutePolicy,
        store: TokenStore,
        history: Rc<dyn HistorySink>,
        initial_path: &str,
    ) -> Self {
        let resolved = policy.decide(initial_path, store.is_authenticated());
        if resolved != initial_path {
            log::info!("initial path {initial_path} gated to {resolved}");
            history.replace(&resolved);
        }
        Self {
            inner: Rc::new(NavInner {
                policy,
                store,
                history,
                phase: Cell::new(NavPhase::Idle),
                current: RefCell::new(resolved),
            }),
        }
    }

    pub fn current_path(&self) -> String {
        self.inner.current.borrow().clone()
    }

    pub fn phase(&self) -> NavPhase {
        self.inner.phase.get()
    }

    /// Programmatic navigation. Returns the committed path, or `None`
    /// when a transition is already in flight: the request is dropped,
    /// not queued, so of two navigations inside one guard window the
    /// first wins. On `Some` the caller re-renders and must call
    /// [`NavigationController::finish_transition`] once the render has
    /// settled.
    pub fn navigate(&self, path: &str) -> Option<String> {
        if self.inner.phase.get() == NavPhase::Transitioning {
            log::debug!("navigate({path}) dropped: transition in flight");
            return None;
        }
        self.inner.phase.set(NavPhase::Transitioning);
        let resolved = self.resolve(path);
        self.inner.history.push(&resolved);
        *self.inner.current.borrow_mut() = resolved.clone();
        Some(resolved)
    }

    /// Browser back/forward. Ignored while a transition is in flight;
    /// such an event is a byproduct of our own pending history write.
    /// The browser has already moved to `browser_path`, so history is
    /// only touched again when the gate redirects away from it.
    pub fn handle_history_change(&self, browser_path: &str) -> Option<String> {
        if self.inner.phase.get() == NavPhase::Transitioning {
            log::debug!("history event for {browser_path} ignored: transition in flight");
            return None;
        }
        self.inner.phase.set(NavPhase::Transitioning);
        let resolved = self.resolve(browser_path);
        if resolved != browser_path {
            self.inner.history.push(&resolved);
        }
        *self.inner.current.borrow_mut() = resolved.clone();
        Some(resolved)
    }

    /// Re-arm the controller once the committed transition has been
    /// rendered. Until this is called, every navigation request is
    /// dropped. The browser shell schedules this on a short timer after
    /// the path signal updates; tests call it directly.
    pub fn finish_transition(&self) {
        self.inner.phase.set(NavPhase::Idle);
    }

    fn resolve(&self, path: &str) -> String {
        self.inner
            .policy
            .decide(path, self.inner.store.is_authenticated())
    }
}
