//! End-to-end navigation tests for aegis-session.
//!
//! These wire a real TokenStore, RoutePolicy, and NavigationController
//! together against an in-memory storage backend and a history sink
//! that behaves like a browser, including firing a history event
//! synchronously from inside `push`, the exact situation the
//! Transitioning guard exists for.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;

use aegis_session::auth::{Clock, MemoryStorage, TokenStore};
use aegis_session::gate::RoutePolicy;
use aegis_session::models::UserProfile;
use aegis_session::nav::{HistorySink, NavPhase, NavigationController};

const NOW: i64 = 1_700_000_000;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// History sink that echoes every push back into the controller as a
/// synchronous history-change event, the way a browser can fire
/// popstate as a side effect of pushState.
#[derive(Default)]
struct EchoingHistory {
    controller: RefCell<Option<NavigationController>>,
    pushes: RefCell<Vec<String>>,
    echo_was_dropped: Cell<bool>,
}

impl HistorySink for EchoingHistory {
    fn push(&self, path: &str) {
        self.pushes.borrow_mut().push(path.to_string());
        if let Some(nav) = self.controller.borrow().as_ref() {
            let echoed = nav.handle_history_change(path);
            self.echo_was_dropped.set(echoed.is_none());
        }
    }

    fn replace(&self, _path: &str) {}
}

fn make_token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "exp": exp }).to_string().as_bytes());
    format!("{header}.{payload}.sig")
}

fn profile() -> UserProfile {
    UserProfile {
        id: "usr_1".into(),
        email: "demo@neobank.com".into(),
        first_name: "Demo".into(),
        last_name: "User".into(),
        role: "admin".into(),
        company_name: None,
    }
}

fn setup(initial: &str) -> (NavigationController, TokenStore, Rc<EchoingHistory>) {
    let store = TokenStore::new(Rc::new(MemoryStorage::default()), Rc::new(FixedClock(NOW)));
    let history = Rc::new(EchoingHistory::default());
    let nav = NavigationController::new(
        RoutePolicy::default(),
        store.clone(),
        history.clone(),
        initial,
    );
    *history.controller.borrow_mut() = Some(nav.clone());
    (nav, store, history)
}

#[test]
fn redirect_with_synchronous_echo_does_not_loop() {
    let (nav, _store, history) = setup("/");

    // Unauthenticated navigation to the dashboard resolves to login.
    let resolved = nav.navigate("/dashboard");
    assert_eq!(resolved.as_deref(), Some("/login"));

    // The push fired a synchronous history event; the guard dropped it.
    assert!(history.echo_was_dropped.get());
    assert_eq!(*history.pushes.borrow(), vec!["/login"]);
    assert_eq!(nav.current_path(), "/login");

    // Exactly one transition: still in flight until the host finishes it,
    // and finishing it leaves the committed path untouched.
    assert_eq!(nav.phase(), NavPhase::Transitioning);
    nav.finish_transition();
    assert_eq!(nav.phase(), NavPhase::Idle);
    assert_eq!(nav.current_path(), "/login");
    assert_eq!(history.pushes.borrow().len(), 1);
}

#[test]
fn login_then_visit_login_page_bounces_to_dashboard() {
    let (nav, store, history) = setup("/login");
    store.save(&make_token(NOW + 3600), &profile());

    let resolved = nav.navigate("/login");
    assert_eq!(resolved.as_deref(), Some("/dashboard"));
    assert!(history.echo_was_dropped.get());
    nav.finish_transition();

    // Now authenticated, the dashboard is reachable directly.
    assert_eq!(nav.navigate("/dashboard"), Some("/dashboard".to_string()));
}

#[test]
fn logout_mid_session_gates_the_next_navigation() {
    let (nav, store, _history) = setup("/");
    store.save(&make_token(NOW + 3600), &profile());

    assert_eq!(nav.navigate("/dashboard"), Some("/dashboard".to_string()));
    nav.finish_transition();

    // Local clear (the logout path even when transport fails): the very
    // next navigation sees the unauthenticated state.
    store.clear();
    assert!(!store.is_authenticated());
    assert_eq!(nav.navigate("/dashboard"), Some("/login".to_string()));
}

#[test]
fn expired_token_counts_as_unauthenticated_for_navigation() {
    let (nav, store, _history) = setup("/");
    store.save(&make_token(NOW - 1), &profile());

    assert_eq!(nav.navigate("/dashboard"), Some("/login".to_string()));
    // The profile is still readable for display while the redirect lands.
    assert!(store.current_user().is_some());
}

#[test]
fn two_navigations_in_one_guard_window_collapse_to_the_first() {
    let (nav, _store, _history) = setup("/");

    assert_eq!(nav.navigate("/signup"), Some("/signup".to_string()));
    assert_eq!(nav.navigate("/login"), None);
    assert_eq!(nav.current_path(), "/signup");

    nav.finish_transition();
    assert_eq!(nav.navigate("/login"), Some("/login".to_string()));
}
