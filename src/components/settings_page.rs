//! Settings Page
//!
//! Backend settings, the active profile, password change and the
//! most recent log lines for troubleshooting.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{ExportSettings, ProfileUpdate, Settings, SystemSettings};

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="settings-page">
            <h1>"Nastavitve"</h1>
            <SettingsForm />
            <ProfileForm />
            <PasswordForm />
            <RecentLog />
        </div>
    }
}

#[component]
fn SettingsForm() -> impl IntoView {
    let ctx = use_app_context();
    let export_format = RwSignal::new(String::new());
    let export_location = RwSignal::new(String::new());
    let language = RwSignal::new(String::new());
    let theme = RwSignal::new(String::new());

    spawn_local(async move {
        match ctx.api().get_settings().await {
            Ok(settings) => {
                let export = settings.export.unwrap_or_default();
                let system = settings.system.unwrap_or_default();
                export_format.set(export.format);
                export_location.set(export.location);
                language.set(system.language);
                theme.set(system.theme);
            }
            Err(err) => ctx.notify_error("Napaka pri nalaganju nastavitev", err),
        }
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let settings = Settings {
            export: Some(ExportSettings {
                format: export_format.get(),
                location: export_location.get(),
            }),
            system: Some(SystemSettings {
                language: language.get(),
                theme: theme.get(),
            }),
        };
        spawn_local(async move {
            match ctx.api().update_settings(&settings).await {
                Ok(_) => ctx.notify_success("Nastavitve shranjene"),
                Err(err) => ctx.notify_error("Napaka pri shranjevanju nastavitev", err),
            }
        });
    };

    view! {
        <form class="settings-form" on:submit=save>
            <h2>"Izvoz"</h2>
            <TextField label="Format" value=export_format />
            <TextField label="Lokacija" value=export_location />
            <h2>"Sistem"</h2>
            <TextField label="Jezik" value=language />
            <TextField label="Tema" value=theme />
            <button type="submit">"Shrani nastavitve"</button>
        </form>
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] password: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type=if password { "password" } else { "text" }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let ctx = use_app_context();
    let profile_id = RwSignal::new(None::<u32>);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());

    // Profiles are global; the first one is the active profile
    spawn_local(async move {
        match ctx.api().list_profiles().await {
            Ok(profiles) => {
                let Some(profile) = profiles.into_iter().next() else {
                    log::warn!("backend returned no profiles");
                    return;
                };
                profile_id.set(Some(profile.id));
                first_name.set(profile.first_name);
                last_name.set(profile.last_name);
                email.set(profile.email);
            }
            Err(err) => ctx.notify_error("Napaka pri nalaganju profila", err),
        }
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = profile_id.get() else { return };
        let update = ProfileUpdate {
            first_name: Some(first_name.get()),
            last_name: Some(last_name.get()),
            email: Some(email.get()),
        };
        spawn_local(async move {
            match ctx.api().update_profile(id, &update).await {
                Ok(_) => ctx.notify_success("Profil posodobljen"),
                Err(err) => ctx.notify_error("Napaka pri posodabljanju profila", err),
            }
        });
    };

    view! {
        <form class="profile-form" on:submit=save>
            <h2>"Profil"</h2>
            <TextField label="Ime" value=first_name />
            <TextField label="Priimek" value=last_name />
            <TextField label="E-pošta" value=email />
            <button type="submit" disabled=move || profile_id.get().is_none()>"Shrani profil"</button>
        </form>
    }
}

#[component]
fn PasswordForm() -> impl IntoView {
    let ctx = use_app_context();
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (old, new) = (old_password.get(), new_password.get());
        if new.is_empty() || new != confirm_password.get() {
            ctx.notify_error("Sprememba gesla", "gesli se ne ujemata");
            return;
        }
        spawn_local(async move {
            match ctx.api().change_password(&old, &new).await {
                Ok(()) => {
                    ctx.notify_success("Geslo spremenjeno");
                    old_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                }
                Err(err) => ctx.notify_error("Napaka pri spremembi gesla", err),
            }
        });
    };

    view! {
        <form class="password-form" on:submit=save>
            <h2>"Geslo"</h2>
            <TextField label="Trenutno geslo" value=old_password password=true />
            <TextField label="Novo geslo" value=new_password password=true />
            <TextField label="Ponovi novo geslo" value=confirm_password password=true />
            <button type="submit">"Spremeni geslo"</button>
        </form>
    }
}

/// Last log lines kept by the console logger
#[component]
fn RecentLog() -> impl IntoView {
    let (lines, set_lines) = signal(console_logger::recent());

    view! {
        <section class="recent-log">
            <h2>"Dnevnik"</h2>
            <button type="button" on:click=move |_| set_lines.set(console_logger::recent())>"Osveži"</button>
            <pre>{move || lines.get().join("\n")}</pre>
        </section>
    }
}
