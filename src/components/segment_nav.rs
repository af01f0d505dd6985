//! Segment Navigation Component

use leptos::prelude::*;

use crate::checklist::Checklist;

/// How many segments are listed on each side of the active one
const WINDOW_RADIUS: usize = 2;

/// Side list of segments around the active one; clicking jumps there
#[component]
pub fn SegmentNav(
    checklist: RwSignal<Option<Checklist>>,
    active_step: Memo<Option<usize>>,
    on_jump: Callback<usize>,
) -> impl IntoView {
    let entries = move || {
        let active = active_step.get()?;
        checklist.with_untracked(|c| {
            let c = c.as_ref()?;
            let window = c.visible_segment_window(WINDOW_RADIUS);
            let hidden_before = window.start > 0;
            let hidden_after = window.end < c.segments().len();
            let items = c.segments()[window.clone()]
                .iter()
                .zip(window)
                .map(|(segment, index)| {
                    let title = format!("{}. {}", index + 1, segment.name);
                    view! {
                        <li
                            class=if index == active { "segment-link active" } else { "segment-link" }
                            on:click=move |_| on_jump.run(index)
                        >
                            {title}
                        </li>
                    }
                })
                .collect_view();
            Some(view! {
                {hidden_before.then(|| view! { <li class="segment-more">"…"</li> })}
                {items}
                {hidden_after.then(|| view! { <li class="segment-more">"…"</li> })}
            })
        })
    };

    view! {
        <nav class="segment-nav">
            <h3>"Segmenti"</h3>
            <ul>{entries}</ul>
        </nav>
    }
}
