//! Quiz progress, persisted so a reload resumes the test
//!
//! Answers are indexed by question: answering question `i` again drops every
//! answer after it.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use quirkverse_player_ports::outbound::{storage_keys, StorageProvider};
use quirkverse_protocol::PersonalityQuestion;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityProgress {
    pub questions: Vec<PersonalityQuestion>,
    /// Chosen option index per answered question
    pub answers: Vec<i32>,
    pub is_test_completed: bool,
}

impl PersonalityProgress {
    /// Completed with one answer for every question
    pub fn is_ready_to_submit(&self) -> bool {
        self.is_test_completed
            && !self.questions.is_empty()
            && self.answers.len() == self.questions.len()
    }
}

#[derive(Clone)]
pub struct PersonalityProgressStore {
    storage: Arc<dyn StorageProvider>,
    state: Arc<RwLock<PersonalityProgress>>,
}

impl PersonalityProgressStore {
    /// Restore saved progress; unreadable data starts a fresh test.
    pub fn load(storage: Arc<dyn StorageProvider>) -> Self {
        let progress = storage
            .load(storage_keys::PERSONALITY_PROGRESS)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(progress) => Some(progress),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable quiz progress");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            storage,
            state: Arc::new(RwLock::new(progress)),
        }
    }

    pub fn snapshot(&self) -> PersonalityProgress {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self) -> RwLockWriteGuard<'_, PersonalityProgress> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, progress: &PersonalityProgress) {
        match serde_json::to_string(progress) {
            Ok(json) => self.storage.save(storage_keys::PERSONALITY_PROGRESS, &json),
            Err(e) => tracing::error!(error = %e, "Failed to persist quiz progress"),
        }
    }

    fn update<F: FnOnce(&mut PersonalityProgress) -> R, R>(&self, change: F) -> R {
        let mut state = self.write();
        let result = change(&mut state);
        self.persist(&state);
        result
    }

    pub fn set_questions(&self, questions: Vec<PersonalityQuestion>) {
        self.update(|p| p.questions = questions);
    }

    /// Record the answer to question `question_index`.
    ///
    /// Returns false (and changes nothing) when earlier questions are unanswered.
    pub fn add_answer(&self, question_index: usize, answer_index: i32) -> bool {
        self.update(|p| {
            if question_index > p.answers.len() {
                tracing::warn!(
                    question_index,
                    answered = p.answers.len(),
                    "Ignoring answer past the first unanswered question"
                );
                return false;
            }
            p.answers.truncate(question_index);
            p.answers.push(answer_index);
            true
        })
    }

    pub fn set_answers(&self, answers: Vec<i32>) {
        self.update(|p| p.answers = answers);
    }

    pub fn set_test_completed(&self, completed: bool) {
        self.update(|p| p.is_test_completed = completed);
    }

    pub fn reset(&self) {
        *self.write() = PersonalityProgress::default();
        self.storage.remove(storage_keys::PERSONALITY_PROGRESS);
    }
}
