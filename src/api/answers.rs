//! Answer Endpoints
//!
//! The backend upserts answers keyed by (question, serial number string).

use super::{ApiClient, ApiError, HttpRequest, Method};
use crate::models::Answer;

impl ApiClient {
    /// Answers recorded against one serial number (by its id)
    pub async fn list_answers(&self, serial_id: u32) -> Result<Vec<Answer>, ApiError> {
        let request = HttpRequest::new(Method::Get, "/odgovori/").query("serijska_stevilka", serial_id);
        self.fetch(request).await
    }

    pub async fn save_answer(&self, answer: &Answer) -> Result<Answer, ApiError> {
        self.send(Method::Post, "/odgovori/", answer).await
    }

    /// Save several answers in one request; the backend accepts or rejects
    /// the whole batch
    pub async fn save_answers(&self, answers: &[Answer]) -> Result<(), ApiError> {
        self.send_discard(Method::Post, "/odgovori/batch/", Some(answers)).await
    }
}
