//! Loaded checklist and its step-by-step navigation.

use std::ops::Range;

use super::answers::{AnswerBook, AnswerKey};
use super::params::ChecklistParams;
use crate::models::{Answer, Project, Question, Segment, SerialNumber};

/// Result of pressing "next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(usize),
    /// Already on the last segment; the caller leaves the checklist
    Finished,
}

/// A ready checklist: everything fetched for one (project, type) pair plus
/// the answers recorded so far. Navigation never refetches.
#[derive(Debug, Clone, PartialEq)]
pub struct Checklist {
    params: ChecklistParams,
    project: Project,
    segments: Vec<Segment>,
    questions: Vec<Question>,
    serials: Vec<SerialNumber>,
    answers: AnswerBook,
    active_step: usize,
}

impl Checklist {
    pub fn new(
        params: ChecklistParams,
        project: Project,
        segments: Vec<Segment>,
        questions: Vec<Question>,
        serials: Vec<SerialNumber>,
        answers: AnswerBook,
    ) -> Self {
        Self {
            params,
            project,
            segments,
            questions,
            serials,
            answers,
            active_step: 0,
        }
    }

    pub fn params(&self) -> &ChecklistParams {
        &self.params
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn serials(&self) -> &[SerialNumber] {
        &self.serials
    }

    pub fn answers(&self) -> &AnswerBook {
        &self.answers
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.segments.get(self.active_step)
    }

    /// Questions of the active segment, in listing order
    pub fn active_questions(&self) -> Vec<&Question> {
        match self.active_segment() {
            Some(segment) => self.questions.iter().filter(|q| q.segment_id == segment.id).collect(),
            None => Vec::new(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.active_step > 0
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step + 1 >= self.segments.len()
    }

    /// Step back one segment; returns the new step, or `None` on the first
    pub fn back(&mut self) -> Option<usize> {
        if !self.can_go_back() {
            return None;
        }
        self.active_step -= 1;
        Some(self.active_step)
    }

    pub fn advance(&mut self) -> StepOutcome {
        if self.is_last_step() {
            return StepOutcome::Finished;
        }
        self.active_step += 1;
        StepOutcome::Moved(self.active_step)
    }

    /// Jump from the side navigation. Out-of-range indexes are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.segments.len() {
            return false;
        }
        self.active_step = index;
        true
    }

    /// Indexes of the segments shown around the active one
    pub fn visible_segment_window(&self, radius: usize) -> Range<usize> {
        let start = self.active_step.saturating_sub(radius);
        let end = (self.active_step + radius + 1).min(self.segments.len());
        start..end
    }

    pub fn answer(&self, question_id: u32, serial: &str) -> Option<&str> {
        self.answers.get(question_id, serial)
    }

    fn has_serial(&self, serial: &str) -> bool {
        self.serials.iter().any(|s| s.value == serial)
    }

    fn build_answer(&self, question_id: u32, serial: &str, value: &str) -> Answer {
        Answer::new(question_id, value, self.project.id.clone(), serial)
    }

    /// Record one cell locally and return the answer to upsert.
    /// Serials outside the current set are rejected.
    pub fn record(&mut self, question_id: u32, serial: &str, value: &str) -> Option<Answer> {
        if !self.has_serial(serial) {
            log::warn!("ignoring answer for unknown serial number {}", serial);
            return None;
        }
        let key = AnswerKey::new(question_id, serial);
        log::debug!("recorded {} = {:?}", key.legacy_key(), value);
        self.answers.set(key, value);
        Some(self.build_answer(question_id, serial, value))
    }

    /// Apply one value to every serial number of a question
    pub fn apply_to_all(&mut self, question_id: u32, value: &str) -> Vec<Answer> {
        let serials: Vec<String> = self.serials.iter().map(|s| s.value.clone()).collect();
        self.answers
            .apply_all(question_id, serials.iter().map(String::as_str), value);
        serials
            .iter()
            .map(|serial| self.build_answer(question_id, serial, value))
            .collect()
    }

    /// Every locally recorded answer of the active segment, for the explicit
    /// save action
    pub fn pending_for_active_segment(&self) -> Vec<Answer> {
        let mut pending = Vec::new();
        for question in self.active_questions() {
            for serial in &self.serials {
                if let Some(value) = self.answers.get(question.id, &serial.value) {
                    pending.push(self.build_answer(question.id, &serial.value, value));
                }
            }
        }
        pending
    }
}
