//! Browser backends for the session core's platform traits.

use aegis_session::auth::{Clock, SessionStorage};
use aegis_session::nav::HistorySink;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// LocalStorage-backed session storage, durable across reloads within
/// the same origin.
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::set(key, value) {
            log::error!("localStorage write for {key} failed: {e:?}");
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Wall clock from `js_sys::Date` (`std::time` has no WASM backing).
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_unix(&self) -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }
}

/// History sink over the browser History API: URL changes without a
/// full reload.
pub struct BrowserHistory;

impl HistorySink for BrowserHistory {
    fn push(&self, path: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::error!("pushState({path}) failed: {e:?}");
            }
        }
    }

    fn replace(&self, path: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::error!("replaceState({path}) failed: {e:?}");
            }
        }
    }
}

/// The path the browser is currently showing, `/` when unavailable.
pub fn current_pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
