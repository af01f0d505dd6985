//! Kontrola Frontend App
//!
//! Provides the shared context and picks the screen for the current path.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{clear_stored_session, ApiClient, OWNER_STORAGE_KEY};
use crate::components::{ChecklistPage, ProjectList, SettingsPage, Toasts, TypeAdmin, UserAdmin};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::route::{self, Route};
use crate::store::{AppState, AppStore};

/// Keep the personal number where new projects pick their owner from
fn remember_owner(personal_number: &str) {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    if let Some(storage) = storage {
        if let Err(err) = storage.set_item(OWNER_STORAGE_KEY, personal_number) {
            log::warn!("could not store personal number: {:?}", err);
        }
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(ApiClient::browser(&config));
    provide_context(ctx);
    provide_context(AppStore::new(AppState::default()));

    let current = route::current();
    log::debug!("route {:?}", current);
    let user_label = RwSignal::new(String::new());

    // The backend sets the csrftoken cookie on the first call. The login
    // notice skips the user lookup, a 401 there would redirect in a loop.
    let check_session = current != Route::Login;
    spawn_local(async move {
        let api = ctx.api();
        if let Err(err) = api.init_csrf().await {
            log::warn!("CSRF bootstrap failed: {}", err);
        }
        if !check_session {
            return;
        }
        match api.current_user().await {
            Ok(user) => {
                remember_owner(&user.personal_number);
                user_label.set(format!("{} {} ({})", user.first_name, user.last_name, user.personal_number));
            }
            Err(err) => log::warn!("current user unavailable: {}", err),
        }
    });

    let logout = move |_| {
        spawn_local(async move {
            match ctx.api().logout().await {
                Ok(()) => {
                    clear_stored_session();
                    route::navigate(&Route::Login);
                }
                Err(err) => ctx.notify_error("Napaka pri odjavi", err),
            }
        });
    };

    let screen = match current {
        Route::Projects => view! { <ProjectList /> }.into_any(),
        Route::Checklist(params) => view! { <ChecklistPage params=params /> }.into_any(),
        Route::Types => view! { <TypeAdmin /> }.into_any(),
        Route::Users => view! { <UserAdmin /> }.into_any(),
        Route::Settings => view! { <SettingsPage /> }.into_any(),
        Route::Login => view! {
            <div class="notice">
                <h2>"Seja je potekla"</h2>
                <p>"Prijavite se v glavni aplikaciji in se vrnite."</p>
            </div>
        }
        .into_any(),
        Route::NotFound => view! {
            <div class="notice">
                <h2>"Stran ne obstaja"</h2>
                <a href="/">"Nazaj na projekte"</a>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="app-layout">
            <header class="top-bar">
                <a href=Route::Projects.path()>"Projekti"</a>
                <a href=Route::Types.path()>"Tipi"</a>
                <a href=Route::Users.path()>"Uporabniki"</a>
                <a href=Route::Settings.path()>"Nastavitve"</a>
                <span class="user">{move || user_label.get()}</span>
                <Show when=move || !user_label.get().is_empty()>
                    <button type="button" class="logout" on:click=logout>"Odjava"</button>
                </Show>
            </header>
            <main class="main-content">{screen}</main>
            <Toasts />
        </div>
    }
}
