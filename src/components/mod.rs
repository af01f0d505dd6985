//! UI Components
//!
//! Leptos components for each screen and the pieces they share.

mod answer_buttons;
mod checklist_page;
mod delete_confirm_button;
mod new_project_form;
mod project_list;
mod question_block;
mod segment_nav;
mod settings_page;
mod toasts;
mod type_admin;
mod user_admin;

pub use checklist_page::ChecklistPage;
pub use project_list::ProjectList;
pub use settings_page::SettingsPage;
pub use toasts::Toasts;
pub use type_admin::TypeAdmin;
pub use user_admin::UserAdmin;
