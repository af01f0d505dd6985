//! Application Context
//!
//! Shared handles provided via Leptos Context API: the API client and the
//! transient notifications every screen reports into.

use std::fmt::Display;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;

/// How long a notification stays on screen
const TOAST_MILLIS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<ApiClient>,
    /// Notifications currently shown
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u32>,
}

impl AppContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: StoredValue::new(api),
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(0),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    /// Log a failed action and tell the user about it
    pub fn notify_error(&self, action: &str, err: impl Display) {
        log::error!("{}: {}", action, err);
        self.push(ToastKind::Error, format!("{}: {}", action, err));
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_toast.get_value() + 1;
        self.next_toast.set_value(id);
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            ctx.dismiss(id);
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
