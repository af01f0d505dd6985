//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the
//! lists the admin screens share: inspection types and projects.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{InspectionType, Project};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All inspection types, in backend order
    pub types: Vec<InspectionType>,
    pub projects: Vec<Project>,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_add_type(store: &AppStore, inspection_type: InspectionType) {
    store.types().write().push(inspection_type);
}

pub fn store_update_type(store: &AppStore, updated: InspectionType) {
    if let Some(existing) = store.types().write().iter_mut().find(|t| t.id == updated.id) {
        *existing = updated;
    }
}

pub fn store_remove_type(store: &AppStore, type_id: u32) {
    store.types().write().retain(|t| t.id != type_id);
}

/// Name of a type for display, falling back to its id
pub fn type_name(types: &[InspectionType], type_id: u32) -> String {
    types
        .iter()
        .find(|t| t.id == type_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| format!("Tip {}", type_id))
}

/// Insert a project, or replace the one with the same id
pub fn store_add_project(store: &AppStore, project: Project) {
    let field = store.projects();
    let mut projects = field.write();
    match projects.iter().position(|p| p.id == project.id) {
        Some(index) => projects[index] = project,
        None => projects.push(project),
    }
}

pub fn store_remove_project(store: &AppStore, project_id: &str) {
    store.projects().write().retain(|p| p.id != project_id);
}
