//! Session context shared through the component tree.
//!
//! Bundles the token store, loading coordinator, and navigation
//! controller behind one `Copy` handle that views receive via Leptos
//! context, an explicitly injected dependency instead of a
//! window-global `navigate` function. The core objects are `Rc`-based
//! and single-threaded, so they live in a local `StoredValue` arena
//! slot.

use aegis_session::auth::TokenStore;
use aegis_session::loading::LoadingCoordinator;
use aegis_session::models::UserProfile;
use aegis_session::nav::NavigationController;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::api::{self, ApiError};
use crate::types::RegisterRequest;

/// How long after committing a path the controller keeps dropping
/// re-entrant navigation triggers. Long enough to absorb the synchronous
/// re-render and any history event it fires, short enough not to block
/// a legitimate follow-up click.
const TRANSITION_GUARD_MS: u32 = 100;

struct SessionInner {
    store: TokenStore,
    loading: LoadingCoordinator,
    nav: NavigationController,
}

#[derive(Clone, Copy)]
pub struct Session {
    inner: StoredValue<SessionInner, LocalStorage>,
    path: RwSignal<String>,
}

impl Session {
    pub fn new(
        store: TokenStore,
        loading: LoadingCoordinator,
        nav: NavigationController,
        path: RwSignal<String>,
    ) -> Self {
        Self {
            inner: StoredValue::new_local(SessionInner {
                store,
                loading,
                nav,
            }),
            path,
        }
    }

    /// The committed path, as a reactive signal for the view selector.
    pub fn path(&self) -> RwSignal<String> {
        self.path
    }

    pub fn loading(&self) -> LoadingCoordinator {
        self.inner.with_value(|i| i.loading.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.with_value(|i| i.store.is_authenticated())
    }

    /// Display-only profile; never an authorization check.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.with_value(|i| i.store.current_user())
    }

    fn store(&self) -> TokenStore {
        self.inner.with_value(|i| i.store.clone())
    }

    fn nav(&self) -> NavigationController {
        self.inner.with_value(|i| i.nav.clone())
    }

    /// Navigate, update the path signal, and re-arm the controller once
    /// the guard window has passed. Requests that land inside the window
    /// are dropped by the controller.
    pub fn go(&self, path: &str) {
        let nav = self.nav();
        let Some(resolved) = nav.navigate(path) else {
            return;
        };
        self.path.set(resolved);
        schedule_finish(nav);
    }

    /// Browser back/forward, fed through the same gate.
    pub fn on_history_change(&self, browser_path: &str) {
        let nav = self.nav();
        let Some(resolved) = nav.handle_history_change(browser_path) else {
            return;
        };
        self.path.set(resolved);
        schedule_finish(nav);
    }

    /// Login against the auth transport. On success the session is
    /// written (token and profile together) and the user lands on the
    /// dashboard. The loading pair is balanced on every path.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), String> {
        let loading = self.loading();
        loading.start();
        let result = api::login(email, password).await;
        loading.end();

        let data = result.map_err(|e| self.handle_api_error(e))?;
        self.store().save(&data.token, &data.user);
        self.go("/dashboard");
        Ok(())
    }

    /// Register a new account; the transport issues a session right away.
    pub async fn register(&self, body: &RegisterRequest) -> Result<(), String> {
        let loading = self.loading();
        loading.start();
        let result = api::register(body).await;
        loading.end();

        let data = result.map_err(|e| self.handle_api_error(e))?;
        self.store().save(&data.token, &data.user);
        self.go("/dashboard");
        Ok(())
    }

    /// Map an API failure to the message the UI shows. `Unauthorized`
    /// means the server invalidated the token even though its expiry
    /// claim still looks fine, so the local session is cleared and the
    /// user lands back on login. Every API call site routes its error
    /// through here.
    fn handle_api_error(&self, err: ApiError) -> String {
        if err == ApiError::Unauthorized {
            log::info!("server rejected the session token, signing out locally");
            self.store().clear();
            if self.nav().current_path() != "/login" {
                self.go("/login");
            }
        }
        err.to_string()
    }

    /// Logout. The transport call is best-effort: the local session is
    /// cleared whether or not the server acknowledged, so a network
    /// failure can never leave the user locally signed in.
    pub async fn logout(&self) {
        let loading = self.loading();
        let store = self.store();

        loading.start();
        if let Some(token) = store.token() {
            if let Err(e) = api::logout(&token).await {
                log::warn!("logout transport failed (clearing local session anyway): {e}");
            }
        }
        store.clear();
        loading.end();
        self.go("/login");
    }
}

// The platform has no render-complete event, so the explicit
// finish_transition signal rides on a short timer.
fn schedule_finish(nav: NavigationController) {
    Timeout::new(TRANSITION_GUARD_MS, move || nav.finish_transition()).forget();
}
