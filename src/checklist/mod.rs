//! Checklist Workflow
//!
//! Headless model of the checklist screen: loading a (project, type)
//! checklist, stepping through segments, and recording answers per serial
//! number. The Leptos page in `components::checklist_page` only renders it.

mod params;
mod answers;
mod loader;
mod session;
mod saving;

pub use params::{repetition_label, serial_value, ChecklistParams, DEFAULT_REPEAT_COUNT, DEFAULT_TYPE_ID};
pub use loader::{create_missing_project, load_checklist, LoadError};
pub use session::{Checklist, StepOutcome};
pub use saving::{save_batch, save_each, SaveReport};

/// Answer values offered as one-click buttons
pub const ANSWER_YES: &str = "Da";
pub const ANSWER_NO: &str = "Ne";
pub const ANSWER_NA: &str = "n/a";
