//! Question Block Component
//!
//! One question of the active segment: bulk controls, then a row per
//! serial number with choice buttons and a free-text field.

use leptos::prelude::*;

use super::answer_buttons::{AnswerButtons, BulkAnswerButtons};
use crate::checklist::{repetition_label, Checklist};
use crate::models::{Question, SerialNumber};

/// Cell edit: (question id, serial number, value)
pub type CellEdit = (u32, String, String);

#[component]
pub fn QuestionBlock(
    question: Question,
    serials: Vec<SerialNumber>,
    repeat_count: u32,
    checklist: RwSignal<Option<Checklist>>,
    /// Record locally and save
    on_answer: Callback<CellEdit>,
    /// Record locally only, while typing
    on_draft: Callback<CellEdit>,
    on_apply_all: Callback<(u32, String)>,
) -> impl IntoView {
    let question_id = question.id;
    let (bulk_text, set_bulk_text) = signal(String::new());

    let rows = serials
        .into_iter()
        .map(|serial| {
            let value = serial.value.clone();
            let current = Signal::derive(move || {
                checklist.with(|c| {
                    c.as_ref()
                        .and_then(|c| c.answer(question_id, &value))
                        .unwrap_or_default()
                        .to_string()
                })
            });
            let label = format!(
                "Ponovitev {} od {}",
                repetition_label(&serial.value),
                repeat_count
            );
            let (pick_serial, draft_serial, commit_serial) =
                (serial.value.clone(), serial.value.clone(), serial.value.clone());

            view! {
                <div class="repetition">
                    <div class="repetition-label">{label}</div>
                    <AnswerButtons
                        current=current
                        on_pick=move |value: String| on_answer.run((question_id, pick_serial.clone(), value))
                    />
                    <input
                        type="text"
                        class="answer-text"
                        required=question.mandatory
                        placeholder="Vpišite odgovor ali uporabite gumbe zgoraj"
                        prop:value=move || current.get()
                        on:input=move |ev| on_draft.run((question_id, draft_serial.clone(), event_target_value(&ev)))
                        on:change=move |ev| on_answer.run((question_id, commit_serial.clone(), event_target_value(&ev)))
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="question">
            <h3 class="question-text">
                {question.text.clone()}
                {question.mandatory.then(|| view! { <span class="mandatory">" *"</span> })}
            </h3>
            <BulkAnswerButtons on_pick=move |value: String| on_apply_all.run((question_id, value)) />
            <input
                type="text"
                class="bulk-text"
                placeholder="Vnesite besedilo za vse ponovitve"
                prop:value=move || bulk_text.get()
                on:input=move |ev| set_bulk_text.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        let value = bulk_text.get_untracked();
                        if !value.is_empty() {
                            on_apply_all.run((question_id, value));
                        }
                        set_bulk_text.set(String::new());
                    }
                }
            />
            {rows}
            <hr />
        </section>
    }
}
