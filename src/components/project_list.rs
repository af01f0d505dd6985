//! Project List Component
//!
//! Home screen: every project with links into its checklists, owner/date
//! editing, archive export/import and deletion.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::delete_confirm_button::DeleteConfirmButton;
use super::new_project_form::NewProjectForm;
use crate::api::ExportFormat;
use crate::checklist::ChecklistParams;
use crate::context::{use_app_context, AppContext};
use crate::download;
use crate::models::Project;
use crate::route::Route;
use crate::store::{store_add_project, store_remove_project, type_name, use_app_store, AppStateStoreFields, AppStore};

fn reload_projects(ctx: AppContext, store: AppStore) {
    spawn_local(async move {
        let api = ctx.api();
        match futures::try_join!(api.list_projects(), api.list_types()) {
            Ok((projects, types)) => {
                log::debug!("loaded {} projects, {} types", projects.len(), types.len());
                *store.projects().write() = projects;
                *store.types().write() = types;
            }
            Err(err) => ctx.notify_error("Napaka pri nalaganju projektov", err),
        }
    });
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    reload_projects(ctx, store);

    let import_archive = move |ev: web_sys::Event| {
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
            match ctx.api().import_projects(upload).await {
                Ok(()) => {
                    ctx.notify_success("Uvoz uspešno zaključen");
                    reload_projects(ctx, store);
                }
                Err(err) => ctx.notify_error("Napaka pri uvozu", err),
            }
        });
    };

    view! {
        <div class="project-list">
            <h1>"Projekti"</h1>
            <NewProjectForm />
            <label class="import">
                "Uvozi arhiv "
                <input type="file" accept=".zip,.json" on:change=import_archive />
            </label>
            <table>
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Osebna številka"</th>
                        <th>"Datum"</th>
                        <th>"Kontrolni seznami"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.projects().get()
                        key=|p| (p.id.clone(), p.owner.clone(), p.date, p.project_types.len())
                        let:project
                    >
                        <ProjectRow project=project />
                    </For>
                </tbody>
            </table>
            <Show when=move || store.projects().with(Vec::is_empty)>
                <p class="empty">"Ni projektov."</p>
            </Show>
        </div>
    }
}

#[component]
fn ProjectRow(project: Project) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let project_id = StoredValue::new(project.id.clone());
    let original = StoredValue::new(project.clone());

    let editing = RwSignal::new(false);
    let owner = RwSignal::new(project.owner.clone());
    let date = RwSignal::new(project.date.format("%Y-%m-%d").to_string());

    let links = project
        .project_types
        .iter()
        .map(|pt| {
            let href = Route::Checklist(ChecklistParams::new(project.id.clone(), pt.type_id, pt.repeat_count)).path();
            let (type_id, repeat_count) = (pt.type_id, pt.repeat_count);
            let label = move || {
                format!(
                    "{} ({}x)",
                    store.types().with(|types| type_name(types, type_id)),
                    repeat_count
                )
            };
            view! { <a class="checklist-link" href=href>{label}</a> }
        })
        .collect_view();

    let export_archive = move |_| {
        let id = project_id.get_value();
        spawn_local(async move {
            let format = ExportFormat::Archive;
            match ctx.api().export_project(&id, format).await {
                Ok(bytes) => {
                    if let Err(err) = download::save_bytes(&bytes, &format.file_name(&id)) {
                        ctx.notify_error("Napaka pri prenosu datoteke", err);
                    }
                }
                Err(err) => ctx.notify_error("Napaka pri izvozu arhiva", err),
            }
        });
    };

    let save_edit = move |_| {
        let Ok(parsed) = chrono::NaiveDate::parse_from_str(&date.get(), "%Y-%m-%d") else {
            return ctx.notify_error("Neveljaven datum", date.get());
        };
        let mut edited = original.get_value();
        edited.owner = owner.get().trim().to_string();
        edited.date = parsed;
        spawn_local(async move {
            match ctx.api().update_project(&edited).await {
                Ok(updated) => {
                    ctx.notify_success(format!("Projekt {} posodobljen", updated.id));
                    store_add_project(&store, updated);
                    editing.set(false);
                }
                Err(err) => ctx.notify_error("Napaka pri posodabljanju projekta", err),
            }
        });
    };

    let cancel_edit = move |_| {
        let project = original.get_value();
        owner.set(project.owner);
        date.set(project.date.format("%Y-%m-%d").to_string());
        editing.set(false);
    };

    let delete_project = move |_: ()| {
        let id = project_id.get_value();
        spawn_local(async move {
            match ctx.api().delete_project(&id).await {
                Ok(()) => {
                    store_remove_project(&store, &id);
                    ctx.notify_success(format!("Projekt {} izbrisan", id));
                }
                Err(err) => ctx.notify_error("Napaka pri brisanju projekta", err),
            }
        });
    };

    view! {
        <tr>
            <td>{project.id.clone()}</td>
            <Show
                when=move || editing.get()
                fallback=move || {
                    let project = original.get_value();
                    view! {
                        <td>{project.owner.clone()}</td>
                        <td>{project.date.format("%d.%m.%Y").to_string()}</td>
                    }
                }
            >
                <td>
                    <input
                        type="text"
                        prop:value=move || owner.get()
                        on:input=move |ev| owner.set(event_target_value(&ev))
                    />
                </td>
                <td>
                    <input
                        type="date"
                        prop:value=move || date.get()
                        on:input=move |ev| date.set(event_target_value(&ev))
                    />
                </td>
            </Show>
            <td class="links">{links}</td>
            <td class="actions">
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <button type="button" on:click=move |_| editing.set(true)>"Uredi"</button>
                    }
                >
                    <button type="button" on:click=save_edit>"Shrani"</button>
                    <button type="button" on:click=cancel_edit>"Prekliči"</button>
                </Show>
                <button type="button" on:click=export_archive>{ExportFormat::Archive.label()}</button>
                <DeleteConfirmButton on_confirm=delete_project />
            </td>
        </tr>
    }
}
