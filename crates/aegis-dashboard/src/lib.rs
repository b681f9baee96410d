//! AegisX Dashboard, a Leptos CSR WASM application.
//!
//! Single-page fraud-prevention demo: a marketing landing page plus a
//! token-gated security dashboard. Routing is owned by aegis-session's
//! `NavigationController` rather than a router crate, because the
//! authorization gate has to see every path transition, programmatic
//! and back/forward alike, before it commits.

pub mod api;
pub mod chain;
pub mod pages;
pub mod platform;
pub mod session;
pub mod types;

use std::rc::Rc;

use aegis_session::auth::TokenStore;
use aegis_session::gate::RoutePolicy;
use aegis_session::loading::LoadingCoordinator;
use aegis_session::nav::NavigationController;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use chain::MockChain;
use pages::dashboard::DashboardPage;
use pages::home::HomePage;
use pages::login::LoginPage;
use pages::signup::SignupPage;
use platform::{current_pathname, BrowserClock, BrowserHistory, BrowserStorage};
use session::Session;

/// Leptos application root.
#[component]
pub fn App() -> impl IntoView {
    let storage: Rc<BrowserStorage> = Rc::new(BrowserStorage);
    let store = TokenStore::new(storage.clone(), Rc::new(BrowserClock));
    let loading = LoadingCoordinator::new();
    let nav = NavigationController::new(
        RoutePolicy::default(),
        store.clone(),
        Rc::new(BrowserHistory),
        &current_pathname(),
    );

    let path = RwSignal::new(nav.current_path());
    let session = Session::new(store, loading.clone(), nav, path);

    // Global busy flag for the overlay, driven by loading edges.
    let (busy, set_busy) = signal(false);
    loading.subscribe(move |is_busy| set_busy.set(is_busy));

    // Browser back/forward feeds the controller like any other trigger.
    let on_popstate = Closure::<dyn FnMut()>::new(move || {
        session.on_history_change(&current_pathname());
    });
    web_sys::window()
        .unwrap()
        .set_onpopstate(Some(on_popstate.as_ref().unchecked_ref()));
    on_popstate.forget();

    provide_context(session);
    provide_context(StoredValue::new_local(Rc::new(MockChain::new(storage))));

    view! {
        <div>
            {move || match path.get().as_str() {
                "/login" => view! { <LoginPage /> }.into_any(),
                "/signup" => view! { <SignupPage /> }.into_any(),
                "/dashboard" => view! { <DashboardPage /> }.into_any(),
                _ => view! { <HomePage /> }.into_any(),
            }}
            {move || busy.get().then(|| view! {
                <div class="loading-overlay fixed inset-0 flex items-center justify-center bg-base-100/50 z-50">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            })}
        </div>
    }
}

// ── WASM entry point ────────────────────────────────────────────────

/// Called by trunk to mount the app.
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("AegisX dashboard starting");
    leptos::mount::mount_to_body(App);
}
