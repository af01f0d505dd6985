//! Fetching everything a checklist needs before it can be shown.

use chrono::NaiveDate;
use futures::future::try_join_all;
use futures::try_join;
use thiserror::Error;

use super::answers::{AnswerBook, AnswerKey};
use super::params::ChecklistParams;
use super::session::Checklist;
use crate::api::{ApiClient, ApiError};
use crate::models::{Project, ProjectType};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The project does not exist yet; the page offers to create it
    #[error("project {0} does not exist")]
    ProjectNotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Load a checklist, creating its serial numbers on the first visit.
pub async fn load_checklist(api: &ApiClient, params: &ChecklistParams) -> Result<Checklist, LoadError> {
    let project = match api.get_project(&params.project_id).await {
        Ok(project) => project,
        Err(err) if err.is_not_found() => return Err(LoadError::ProjectNotFound(params.project_id.clone())),
        Err(err) => return Err(err.into()),
    };

    let repeat_count = project
        .association(params.type_id)
        .map(|pt| pt.repeat_count)
        .unwrap_or(params.repeat_count);
    let params = ChecklistParams::new(params.project_id.clone(), params.type_id, repeat_count);

    let (segments, questions) = try_join!(
        api.list_segments(params.type_id, &params.project_id),
        api.list_questions(params.type_id, &params.project_id),
    )?;

    let existing = api
        .list_serial_numbers(&params.project_id, Some(params.type_id))
        .await?;

    let mut answers = AnswerBook::default();
    let serials = if existing.is_empty() {
        log::info!(
            "creating {} serial numbers for {} / type {}",
            repeat_count,
            params.project_id,
            params.type_id
        );
        try_join_all((0..repeat_count).map(|index| {
            api.create_serial_number(&params.project_id, params.type_id, index)
        }))
        .await?
    } else {
        let per_serial = try_join_all(existing.iter().map(|serial| api.list_answers(serial.id))).await?;
        for (serial, recorded) in existing.iter().zip(per_serial) {
            for answer in recorded {
                answers.set(AnswerKey::new(answer.question_id, serial.value.clone()), answer.value);
            }
        }
        existing
    };

    log::debug!(
        "checklist {} ready: {} segments, {} questions, {} answers",
        params.path(),
        segments.len(),
        questions.len(),
        answers.len()
    );
    Ok(Checklist::new(params, project, segments, questions, serials, answers))
}

/// Create the project a not-found checklist URL points at, dated `today`,
/// with one association taken from the URL parameters.
pub async fn create_missing_project(
    api: &ApiClient,
    params: &ChecklistParams,
    owner: &str,
    today: NaiveDate,
) -> Result<Project, ApiError> {
    let project = Project {
        id: params.project_id.clone(),
        owner: owner.to_string(),
        date: today,
        project_types: vec![ProjectType {
            id: None,
            type_id: params.type_id,
            repeat_count: params.repeat_count,
        }],
    };
    api.create_project(&project).await
}
