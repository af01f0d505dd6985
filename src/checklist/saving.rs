//! Bulk saves with per-answer results.

use futures::future::join_all;

use super::answers::AnswerKey;
use crate::api::{ApiClient, ApiError};
use crate::models::Answer;

/// Which answers of a bulk save landed and which did not
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    pub saved: Vec<AnswerKey>,
    pub failed: Vec<(AnswerKey, ApiError)>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// User-facing one-line outcome
    pub fn summary(&self) -> String {
        if self.is_complete() {
            return format!("Shranjenih odgovorov: {}", self.saved.len());
        }
        let failed: Vec<String> = self
            .failed
            .iter()
            .map(|(key, _)| format!("vprašanje {} ({})", key.question_id, key.serial))
            .collect();
        format!(
            "Shranjenih {} od {}, neuspešno: {}",
            self.saved.len(),
            self.saved.len() + self.failed.len(),
            failed.join(", ")
        )
    }
}

/// Save each answer with its own request, all in flight at once, and
/// collect the outcome of every one.
pub async fn save_each(api: &ApiClient, answers: &[Answer]) -> SaveReport {
    let results = join_all(answers.iter().map(|answer| api.save_answer(answer))).await;

    let mut report = SaveReport::default();
    for (answer, result) in answers.iter().zip(results) {
        let key = AnswerKey::of(answer);
        match result {
            Ok(_) => report.saved.push(key),
            Err(err) => {
                log::error!("saving answer {} failed: {}", key, err);
                report.failed.push((key, err));
            }
        }
    }
    report
}

/// Save a bulk-applied question through the batch endpoint. The backend
/// accepts or rejects the batch as a whole.
pub async fn save_batch(api: &ApiClient, answers: &[Answer]) -> SaveReport {
    let keys = answers.iter().map(AnswerKey::of);
    if answers.is_empty() {
        return SaveReport::default();
    }
    match api.save_answers(answers).await {
        Ok(()) => SaveReport {
            saved: keys.collect(),
            failed: Vec::new(),
        },
        Err(err) => {
            log::error!("batch save of {} answers failed: {}", answers.len(), err);
            SaveReport {
                saved: Vec::new(),
                failed: keys.map(|key| (key, err.clone())).collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::FakeBackend;
    use crate::checklist::{load_checklist, ChecklistParams};

    #[tokio::test]
    async fn test_partial_failure_is_reported_per_answer() {
        let backend = FakeBackend::new();
        backend.fail_saves_for("P1-1-2");
        let api = backend.client();
        let answers = vec![
            Answer::new(1, "Da", "P1", "P1-1-1"),
            Answer::new(1, "Ne", "P1", "P1-1-2"),
            Answer::new(2, "Da", "P1", "P1-1-3"),
        ];

        let report = save_each(&api, &answers).await;

        assert!(!report.is_complete());
        assert_eq!(report.saved, vec![AnswerKey::new(1, "P1-1-1"), AnswerKey::new(2, "P1-1-3")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, AnswerKey::new(1, "P1-1-2"));
        assert!(matches!(report.failed[0].1, ApiError::Status { status: 500, .. }));
        // the other writes still landed
        assert_eq!(backend.stored_answer(2, "P1-1-3").as_deref(), Some("Da"));
        assert_eq!(report.summary(), "Shranjenih 2 od 3, neuspešno: vprašanje 1 (P1-1-2)");
    }

    #[tokio::test]
    async fn test_complete_summary() {
        let backend = FakeBackend::new();
        let api = backend.client();

        let report = save_each(&api, &[Answer::new(1, "Da", "P1", "P1-1-1")]).await;

        assert!(report.is_complete());
        assert_eq!(report.summary(), "Shranjenih odgovorov: 1");
    }

    #[tokio::test]
    async fn test_bulk_apply_reaches_every_serial() {
        let backend = FakeBackend::new();
        backend.insert_project("P1", 1, 3);
        backend.insert_segment(10, 1, "Ohišje", &[7]);
        let api = backend.client();
        let mut checklist = load_checklist(&api, &ChecklistParams::new("P1", 1, 3)).await.unwrap();

        let batch = checklist.apply_to_all(7, "n/a");
        let report = save_batch(&api, &batch).await;

        assert!(report.is_complete());
        for serial in backend.serial_values("P1") {
            assert_eq!(backend.stored_answer(7, &serial).as_deref(), Some("n/a"));
        }
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let backend = FakeBackend::new();
        let api = backend.client();

        let report = save_batch(&api, &[]).await;

        assert!(report.is_complete());
        assert!(backend.requests().is_empty());
    }
}
