//! New Project Form Component
//!
//! Creates a project with its first (type, repeat count) association. The
//! backend generates that association's serial numbers.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::checklist::{DEFAULT_REPEAT_COUNT, DEFAULT_TYPE_ID};
use crate::context::use_app_context;
use crate::models::{Project, ProjectType};
use crate::store::{store_add_project, use_app_store, AppStateStoreFields};

#[component]
pub fn NewProjectForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (project_id, set_project_id) = signal(String::new());
    let (owner, set_owner) = signal(String::new());
    let (type_id, set_type_id) = signal(DEFAULT_TYPE_ID);
    let (repeat_count, set_repeat_count) = signal(DEFAULT_REPEAT_COUNT);

    let create_project = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = project_id.get().trim().to_string();
        if id.is_empty() {
            return;
        }
        let project = Project {
            id,
            owner: owner.get().trim().to_string(),
            date: chrono::Local::now().date_naive(),
            project_types: vec![ProjectType {
                id: None,
                type_id: type_id.get(),
                repeat_count: repeat_count.get().max(1),
            }],
        };

        spawn_local(async move {
            match ctx.api().create_project(&project).await {
                Ok(created) => {
                    ctx.notify_success(format!("Projekt {} ustvarjen", created.id));
                    store_add_project(&store, created);
                    set_project_id.set(String::new());
                }
                Err(err) => ctx.notify_error("Napaka pri ustvarjanju projekta", err),
            }
        });
    };

    view! {
        <form class="new-project-form" on:submit=create_project>
            <input
                type="text"
                placeholder="ID projekta"
                prop:value=move || project_id.get()
                on:input=move |ev| set_project_id.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Osebna številka"
                prop:value=move || owner.get()
                on:input=move |ev| set_owner.set(event_target_value(&ev))
            />
            <select on:change=move |ev| {
                if let Ok(id) = event_target_value(&ev).parse() {
                    set_type_id.set(id);
                }
            }>
                <For
                    each=move || store.types().get()
                    key=|t| t.id
                    let:inspection_type
                >
                    <option
                        value=inspection_type.id.to_string()
                        selected=move || type_id.get() == inspection_type.id
                    >
                        {inspection_type.name.clone()}
                    </option>
                </For>
            </select>
            <input
                type="number"
                min="1"
                prop:value=move || repeat_count.get().to_string()
                on:input=move |ev| {
                    if let Ok(count) = event_target_value(&ev).parse() {
                        set_repeat_count.set(count);
                    }
                }
            />
            <button type="submit">"Dodaj projekt"</button>
        </form>
    }
}
