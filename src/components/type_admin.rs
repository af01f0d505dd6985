//! Type Admin Component
//!
//! Inspection type CRUD plus the question template upload/download.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::delete_confirm_button::DeleteConfirmButton;
use crate::api::template_file_name;
use crate::context::use_app_context;
use crate::download;
use crate::models::InspectionType;
use crate::store::{store_add_type, store_remove_type, store_update_type, use_app_store, AppStateStoreFields};

#[component]
pub fn TypeAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());

    spawn_local(async move {
        match ctx.api().list_types().await {
            Ok(types) => *store.types().write() = types,
            Err(err) => ctx.notify_error("Napaka pri nalaganju tipov", err),
        }
    });

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            match ctx.api().create_type(&name).await {
                Ok(created) => {
                    store_add_type(&store, created);
                    set_new_name.set(String::new());
                }
                Err(err) => ctx.notify_error("Napaka pri dodajanju tipa", err),
            }
        });
    };

    view! {
        <div class="type-admin">
            <h1>"Tipi"</h1>
            <form class="new-type-form" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Naziv novega tipa"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit">"Dodaj"</button>
            </form>
            <ul class="type-list">
                <For each=move || store.types().get() key=|t| t.id let:inspection_type>
                    <TypeRow inspection_type=inspection_type />
                </For>
            </ul>
        </div>
    }
}

#[component]
fn TypeRow(inspection_type: InspectionType) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let type_id = inspection_type.id;
    let (name, set_name) = signal(inspection_type.name.clone());
    let (editing, set_editing) = signal(false);

    let rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_name = name.get().trim().to_string();
        set_editing.set(false);
        if new_name.is_empty() {
            return;
        }
        spawn_local(async move {
            match ctx.api().update_type(type_id, &new_name).await {
                Ok(updated) => store_update_type(&store, updated),
                Err(err) => ctx.notify_error("Napaka pri preimenovanju tipa", err),
            }
        });
    };

    let upload_template = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = download::selected_file(&input) else { return };
        input.set_value("");
        spawn_local(async move {
            let upload = match download::read_file(file).await {
                Ok(upload) => upload,
                Err(err) => return ctx.notify_error("Napaka pri branju datoteke", err),
            };
            match ctx.api().upload_type_template(type_id, upload).await {
                Ok(()) => ctx.notify_success("Predloga naložena"),
                Err(err) => ctx.notify_error("Napaka pri nalaganju predloge", err),
            }
        });
    };

    let download_template = move |_| {
        spawn_local(async move {
            match ctx.api().download_type_template(type_id).await {
                Ok(bytes) => {
                    if let Err(err) = download::save_bytes(&bytes, &template_file_name(type_id)) {
                        ctx.notify_error("Napaka pri prenosu datoteke", err);
                    }
                }
                Err(err) => ctx.notify_error("Napaka pri prenosu predloge", err),
            }
        });
    };

    let delete_type = move |_: ()| {
        spawn_local(async move {
            match ctx.api().delete_type(type_id).await {
                Ok(()) => store_remove_type(&store, type_id),
                Err(err) => ctx.notify_error("Napaka pri brisanju tipa", err),
            }
        });
    };

    view! {
        <li class="type-row">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <span class="type-name" on:dblclick=move |_| set_editing.set(true)>
                        {move || name.get()}
                    </span>
                }
            >
                <form on:submit=rename>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <button type="submit">"Shrani"</button>
                </form>
            </Show>
            <label class="upload">
                "Naloži xlsx "
                <input type="file" accept=".xlsx" on:change=upload_template />
            </label>
            <button type="button" on:click=download_template>"Prenesi predlogo"</button>
            <DeleteConfirmButton on_confirm=delete_type />
        </li>
    }
}
