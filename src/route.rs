//! Screen Routing
//!
//! Maps the browser path to a screen. Navigation is a full page load, so
//! every screen starts from a fresh mount.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsValue;

use crate::checklist::ChecklistParams;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Projects,
    Checklist(ChecklistParams),
    Types,
    Users,
    Settings,
    Login,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => Route::Projects,
            ["checklist", rest @ ..] => ChecklistParams::from_segments(rest)
                .map(Route::Checklist)
                .unwrap_or(Route::NotFound),
            ["tipi"] => Route::Types,
            ["uporabniki"] => Route::Users,
            ["nastavitve"] => Route::Settings,
            ["login"] => Route::Login,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Projects | Route::NotFound => "/".to_string(),
            Route::Checklist(params) => params.path(),
            Route::Types => "/tipi".to_string(),
            Route::Users => "/uporabniki".to_string(),
            Route::Settings => "/nastavitve".to_string(),
            Route::Login => LOGIN_PATH.to_string(),
        }
    }
}

/// Route for the current browser location
pub fn current() -> Route {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    Route::parse(&path)
}

fn log_failure(action: &str, err: JsValue) {
    log::error!("{} failed: {:?}", action, err);
}

pub fn navigate(route: &Route) {
    let Some(window) = web_sys::window() else { return };
    if let Err(err) = window.location().set_href(&route.path()) {
        log_failure("navigation", err);
    }
}

pub fn reload() {
    let Some(window) = web_sys::window() else { return };
    if let Err(err) = window.location().reload() {
        log_failure("reload", err);
    }
}

pub fn scroll_to_top() {
    let Some(window) = web_sys::window() else { return };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screens() {
        assert_eq!(Route::parse("/"), Route::Projects);
        assert_eq!(Route::parse(""), Route::Projects);
        assert_eq!(Route::parse("/tipi"), Route::Types);
        assert_eq!(Route::parse("/uporabniki/"), Route::Users);
        assert_eq!(Route::parse("/nastavitve"), Route::Settings);
        assert_eq!(Route::parse(LOGIN_PATH), Route::Login);
        assert_eq!(Route::parse("/nekaj/drugega"), Route::NotFound);
    }

    #[test]
    fn test_parse_checklist() {
        assert_eq!(
            Route::parse("/checklist/P1/1/3"),
            Route::Checklist(ChecklistParams::new("P1", 1, 3))
        );
        assert_eq!(
            Route::parse("/checklist/P1"),
            Route::Checklist(ChecklistParams::new("P1", 1, 3))
        );
        assert_eq!(Route::parse("/checklist"), Route::NotFound);
    }

    #[test]
    fn test_checklist_id_is_decoded_and_encoded() {
        let route = Route::parse("/checklist/Hala%20A%2F2/2/4");
        assert_eq!(route, Route::Checklist(ChecklistParams::new("Hala A/2", 2, 4)));
        assert_eq!(route.path(), "/checklist/Hala%20A%2F2/2/4");
        assert_eq!(Route::parse(&route.path()), route);
    }
}
