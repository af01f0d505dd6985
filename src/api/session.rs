//! Session Interceptor
//!
//! Supplies the CSRF token for outgoing requests and reacts to expired
//! sessions. Injected into [`super::ApiClient`] so a 401 can be simulated
//! without touching browser navigation.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

use crate::route;

/// Cookie the backend sets from `GET /csrf/`
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the backend expects the token in
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// localStorage key cleared when the session expires
pub const TOKEN_STORAGE_KEY: &str = "token";
/// localStorage key holding the logged-in user's personal number
pub const OWNER_STORAGE_KEY: &str = "osebna_stevilka";

pub trait AuthInterceptor: Send + Sync {
    /// Token to attach as `X-CSRFToken`, if one is known
    fn csrf_token(&self) -> Option<String>;

    /// Called once for every 401 response, whichever call triggered it
    fn on_unauthorized(&self);
}

/// Interceptor for the browser: reads `document.cookie`, clears stored
/// session state and sends the user to the login screen on 401.
pub struct BrowserSession;

impl AuthInterceptor for BrowserSession {
    fn csrf_token(&self) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let cookies = document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()?;
        cookie_value(&cookies, CSRF_COOKIE)
    }

    fn on_unauthorized(&self) {
        log::warn!("session rejected by backend, redirecting to {}", route::LOGIN_PATH);
        clear_stored_session();
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(route::LOGIN_PATH);
        }
    }
}

/// Drop the session token and remembered owner from local storage
pub fn clear_stored_session() {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    if let Some(storage) = storage {
        for key in [TOKEN_STORAGE_KEY, OWNER_STORAGE_KEY] {
            let _ = storage.remove_item(key);
        }
    }
}

/// Find a cookie in a `document.cookie` string and URL-decode its value
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| percent_decode_str(value).decode_utf8_lossy().into_owned())
        })
        .filter(|value| !value.is_empty())
}
