//! Answer Buttons Component
//!
//! One-click DA / NE / N/A choices for a single cell.

use leptos::prelude::*;

use crate::checklist::{ANSWER_NA, ANSWER_NO, ANSWER_YES};

/// (stored value, label, CSS modifier)
pub const ANSWER_CHOICES: &[(&str, &str, &str)] = &[
    (ANSWER_YES, "DA", "yes"),
    (ANSWER_NO, "NE", "no"),
    (ANSWER_NA, "N/A", "na"),
];

/// Choice buttons; the one matching `current` is highlighted
#[component]
pub fn AnswerButtons(
    #[prop(into)] current: Signal<String>,
    #[prop(into)] on_pick: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="answer-buttons">
            {ANSWER_CHOICES.iter().map(|(value, label, modifier)| {
                let is_selected = move || current.get() == *value;
                view! {
                    <button
                        type="button"
                        class=move || {
                            if is_selected() {
                                format!("answer-btn {} active", modifier)
                            } else {
                                format!("answer-btn {}", modifier)
                            }
                        }
                        on:click=move |_| on_pick.run(value.to_string())
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// "All DA / NE / N/A" buttons applying one value to every repetition
#[component]
pub fn BulkAnswerButtons(#[prop(into)] on_pick: Callback<String>) -> impl IntoView {
    view! {
        <div class="answer-buttons bulk">
            {ANSWER_CHOICES.iter().map(|(value, label, modifier)| view! {
                <button
                    type="button"
                    class=format!("answer-btn {} active", modifier)
                    on:click=move |_| on_pick.run(value.to_string())
                >
                    "Vsi " {*label}
                </button>
            }).collect_view()}
        </div>
    }
}
