//! In-memory answer cache keyed by (question, serial number).

use std::collections::HashMap;

use crate::models::Answer;

/// Composite key of an answer. Kept as a pair so identifiers containing
/// `-` can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerKey {
    pub question_id: u32,
    pub serial: String,
}

impl AnswerKey {
    pub fn new(question_id: u32, serial: impl Into<String>) -> Self {
        Self {
            question_id,
            serial: serial.into(),
        }
    }

    pub fn of(answer: &Answer) -> Self {
        Self::new(answer.question_id, answer.serial.clone())
    }

    /// Flat `"{question}-{serial}"` form, for display only
    pub fn legacy_key(&self) -> String {
        format!("{}-{}", self.question_id, self.serial)
    }
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.question_id, self.serial)
    }
}

/// Locally known answer values. No ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerBook {
    values: HashMap<AnswerKey, String>,
}

impl AnswerBook {
    pub fn get(&self, question_id: u32, serial: &str) -> Option<&str> {
        self.values
            .get(&AnswerKey::new(question_id, serial))
            .map(String::as_str)
    }

    pub fn set(&mut self, key: AnswerKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Set the same value for one question across all given serials
    pub fn apply_all<'a>(&mut self, question_id: u32, serials: impl IntoIterator<Item = &'a str>, value: &str) {
        for serial in serials {
            self.set(AnswerKey::new(question_id, serial), value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serials_with_separator() {
        let mut book = AnswerBook::default();
        book.set(AnswerKey::new(1, "2-3"), "Da");
        book.set(AnswerKey::new(12, "3"), "Ne");

        assert_eq!(book.get(1, "2-3"), Some("Da"));
        assert_eq!(book.get(12, "3"), Some("Ne"));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_apply_all_overwrites() {
        let mut book = AnswerBook::default();
        book.set(AnswerKey::new(42, "P1-1-1"), "Ne");
        book.apply_all(42, ["P1-1-1", "P1-1-2"], "n/a");

        assert_eq!(book.get(42, "P1-1-1"), Some("n/a"));
        assert_eq!(book.get(42, "P1-1-2"), Some("n/a"));
        assert_eq!(book.get(43, "P1-1-1"), None);
    }

    #[test]
    fn test_key_of_answer() {
        let answer = Answer::new(9, "Da", "P1", "P1-1-3");
        assert_eq!(AnswerKey::of(&answer), AnswerKey::new(9, "P1-1-3"));
        assert_eq!(AnswerKey::of(&answer).to_string(), "9 / P1-1-3");
        assert_eq!(AnswerKey::of(&answer).legacy_key(), "9-P1-1-3");
    }
}
