//! Toast Notifications

use leptos::prelude::*;

use crate::context::{use_app_context, ToastKind};

/// Stack of transient notifications; each removes itself after a few seconds
#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toasts">
            <For each=move || ctx.toasts.get() key=|t| t.id let:toast>
                <div
                    class=match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    }
                    on:click=move |_| ctx.dismiss(toast.id)
                >
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}
