//! Checklist Page
//!
//! Renders a [`Checklist`]: loading, the error states (with project
//! creation when the project is missing) and the segment-by-segment form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::question_block::{CellEdit, QuestionBlock};
use super::segment_nav::SegmentNav;
use crate::api::{ExportFormat, OWNER_STORAGE_KEY};
use crate::checklist::{
    create_missing_project, load_checklist, save_batch, save_each, Checklist, ChecklistParams, LoadError, SaveReport,
    StepOutcome,
};
use crate::context::{use_app_context, AppContext};
use crate::download;
use crate::models::{Question, SerialNumber};
use crate::route::{self, Route};

const DEFAULT_OWNER: &str = "1";

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Loading,
    NotFound(String),
    Failed(String),
    Ready,
}

fn stored_owner() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(OWNER_STORAGE_KEY).ok().flatten())
        .filter(|owner| !owner.is_empty())
        .unwrap_or_else(|| DEFAULT_OWNER.to_string())
}

fn report_outcome(ctx: AppContext, report: &SaveReport) {
    if report.is_complete() {
        ctx.notify_success(report.summary());
    } else {
        ctx.notify_error("Napaka pri shranjevanju odgovorov", report.summary());
    }
}

#[component]
pub fn ChecklistPage(params: ChecklistParams) -> impl IntoView {
    let ctx = use_app_context();
    let phase = RwSignal::new(Phase::Loading);
    let checklist = RwSignal::new(None::<Checklist>);

    {
        let params = params.clone();
        spawn_local(async move {
            match load_checklist(&ctx.api(), &params).await {
                Ok(loaded) => {
                    checklist.set(Some(loaded));
                    phase.set(Phase::Ready);
                }
                Err(LoadError::ProjectNotFound(id)) => {
                    log::info!("project {} not found", id);
                    phase.set(Phase::NotFound(id));
                }
                Err(err) => {
                    ctx.notify_error("Napaka pri nalaganju", &err);
                    phase.set(Phase::Failed(err.to_string()));
                }
            }
        });
    }

    let create_project = Callback::new(move |_: ()| {
        let params = params.clone();
        spawn_local(async move {
            let today = chrono::Local::now().date_naive();
            match create_missing_project(&ctx.api(), &params, &stored_owner(), today).await {
                Ok(project) => {
                    log::info!("created project {}", project.id);
                    route::reload();
                }
                Err(err) => ctx.notify_error("Napaka pri ustvarjanju projekta", err),
            }
        });
    });

    view! {
        <div class="checklist-page">
            {move || match phase.get() {
                Phase::Loading => view! { <div class="spinner">"Nalaganje..."</div> }.into_any(),
                Phase::NotFound(id) => view! {
                    <div class="notice error">
                        <p>{format!("Projekt {} ne obstaja.", id)}</p>
                        <button on:click=move |_| route::navigate(&Route::Projects)>"Nazaj na začetek"</button>
                        <button on:click=move |_| create_project.run(())>"Ustvari projekt"</button>
                    </div>
                }
                .into_any(),
                Phase::Failed(message) => view! {
                    <div class="notice error">
                        <p>{message}</p>
                        <button on:click=move |_| route::navigate(&Route::Projects)>"Nazaj na začetek"</button>
                    </div>
                }
                .into_any(),
                Phase::Ready => view! { <ChecklistForm checklist=checklist /> }.into_any(),
            }}
        </div>
    }
}

/// The ready form. Structure is rebuilt only when the step changes; answer
/// edits update the cells in place.
#[component]
fn ChecklistForm(checklist: RwSignal<Option<Checklist>>) -> impl IntoView {
    let ctx = use_app_context();
    let active_step = Memo::new(move |_| checklist.with(|c| c.as_ref().map(Checklist::active_step)));
    let can_go_back = Memo::new(move |_| checklist.with(|c| c.as_ref().is_some_and(Checklist::can_go_back)));
    let is_last = Memo::new(move |_| checklist.with(|c| c.as_ref().map_or(true, Checklist::is_last_step)));

    let on_answer = Callback::new(move |(question_id, serial, value): CellEdit| {
        let answer = checklist
            .try_update(|c| c.as_mut().and_then(|c| c.record(question_id, &serial, &value)))
            .flatten();
        let Some(answer) = answer else { return };
        spawn_local(async move {
            match ctx.api().save_answer(&answer).await {
                Ok(_) => ctx.notify_success("Odgovor uspešno shranjen"),
                Err(err) => ctx.notify_error("Napaka pri shranjevanju odgovora", err),
            }
        });
    });

    let on_draft = Callback::new(move |(question_id, serial, value): CellEdit| {
        checklist.update(|c| {
            if let Some(c) = c {
                c.record(question_id, &serial, &value);
            }
        });
    });

    let on_apply_all = Callback::new(move |(question_id, value): (u32, String)| {
        let batch = checklist
            .try_update(|c| c.as_mut().map(|c| c.apply_to_all(question_id, &value)))
            .flatten()
            .unwrap_or_default();
        spawn_local(async move {
            let report = save_batch(&ctx.api(), &batch).await;
            report_outcome(ctx, &report);
        });
    });

    let save_segment = move |_| {
        let pending = checklist
            .with_untracked(|c| c.as_ref().map(Checklist::pending_for_active_segment))
            .unwrap_or_default();
        if pending.is_empty() {
            ctx.notify_success("Ni odgovorov za shranjevanje");
            return;
        }
        spawn_local(async move {
            let report = save_each(&ctx.api(), &pending).await;
            report_outcome(ctx, &report);
        });
    };

    let export = move |format: ExportFormat| {
        let Some(project_id) = checklist.with_untracked(|c| c.as_ref().map(|c| c.project().id.clone())) else {
            return;
        };
        spawn_local(async move {
            match ctx.api().export_project(&project_id, format).await {
                Ok(bytes) => match download::save_bytes(&bytes, &format.file_name(&project_id)) {
                    Ok(()) => ctx.notify_success("Izvoz uspešno zaključen"),
                    Err(err) => ctx.notify_error("Napaka pri prenosu datoteke", err),
                },
                Err(err) => ctx.notify_error(&format!("Napaka pri izvozu ({})", format.label()), err),
            }
        });
    };

    let on_jump = Callback::new(move |index: usize| {
        let moved = checklist
            .try_update(|c| c.as_mut().is_some_and(|c| c.jump_to(index)))
            .unwrap_or(false);
        if moved {
            route::scroll_to_top();
        }
    });

    let go_back = move |_| {
        let moved = checklist.try_update(|c| c.as_mut().and_then(Checklist::back)).flatten();
        if moved.is_some() {
            route::scroll_to_top();
        }
    };

    let go_next = move |_| match checklist.try_update(|c| c.as_mut().map(Checklist::advance)).flatten() {
        Some(StepOutcome::Moved(_)) => route::scroll_to_top(),
        Some(StepOutcome::Finished) => route::navigate(&Route::Projects),
        None => {}
    };

    let heading = move || {
        checklist.with(|c| {
            c.as_ref().map(|c| {
                format!(
                    "Projekt: {} - Število ponovitev: {}",
                    c.project().id,
                    c.params().repeat_count
                )
            })
        })
    };

    let segment_view = move || {
        active_step.track();
        let content = checklist.with_untracked(|c| {
            let c = c.as_ref()?;
            let segment = c.active_segment()?;
            let questions: Vec<Question> = c.active_questions().into_iter().cloned().collect();
            let serials: Vec<SerialNumber> = c.serials().to_vec();
            Some((segment.name.clone(), questions, serials, c.params().repeat_count))
        });
        let Some((name, questions, serials, repeat_count)) = content else {
            return view! { <p class="empty">"Za ta tip ni segmentov."</p> }.into_any();
        };
        let blocks = questions
            .into_iter()
            .map(|question| {
                view! {
                    <QuestionBlock
                        question=question
                        serials=serials.clone()
                        repeat_count=repeat_count
                        checklist=checklist
                        on_answer=on_answer
                        on_draft=on_draft
                        on_apply_all=on_apply_all
                    />
                }
            })
            .collect_view();
        view! {
            <h2>{name}</h2>
            {blocks}
        }
        .into_any()
    };

    view! {
        <h1>"Kontrolni seznam"</h1>
        <p class="subtitle">{heading}</p>
        <div class="checklist-layout">
            <SegmentNav checklist=checklist active_step=active_step on_jump=on_jump />
            <div class="segment-content">
                {segment_view}
                <div class="step-buttons">
                    <button on:click=go_back disabled=move || !can_go_back.get()>"Nazaj"</button>
                    <button class="primary" on:click=go_next>
                        {move || if is_last.get() { "Zaključi" } else { "Naprej" }}
                    </button>
                </div>
            </div>
        </div>
        <div class="floating-actions">
            <button title="Shrani odgovore" on:click=save_segment>"Shrani"</button>
            <button title="Izvozi v Excel" on:click=move |_| export(ExportFormat::Xlsx)>"Excel"</button>
            <button title="Izvozi v PDF" on:click=move |_| export(ExportFormat::Pdf)>"PDF"</button>
        </div>
    }
}
