//! Q&A manager
//!
//! Questions are stored in submission order. The display order is derived
//! on every read: pinned questions first, then unpinned ones, each group
//! keeping submission order. Pinning never reorders storage, so unpinning
//! a question puts it back where it was submitted.

use tracing::info;

use crate::{
    models::{QAQuestion, QuestionId},
    validation::{TextValidator, LABEL_MAX},
    Error, Result,
};

/// Author recorded for questions submitted without a name
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone)]
pub struct QAManager {
    questions: Vec<QAQuestion>,
    max_length: usize,
}

impl QAManager {
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self {
            questions: Vec::new(),
            max_length,
        }
    }

    pub fn submit_question(&mut self, author: &str, text: &str) -> Result<QAQuestion> {
        let author = if author.trim().is_empty() {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            TextValidator::new("author")
                .with_max_length(LABEL_MAX)
                .validate(author)?
        };
        let text = TextValidator::new("question text")
            .with_max_length(self.max_length)
            .validate(text)?;

        let question = QAQuestion::new(author, text);
        self.questions.push(question.clone());

        info!(question_id = %question.id, author = %question.author, "Question submitted");
        Ok(question)
    }

    pub fn toggle_answered(&mut self, question_id: &QuestionId) -> Result<QAQuestion> {
        let question = self.get_mut(question_id)?;
        question.answered = !question.answered;

        info!(question_id = %question.id, answered = question.answered, "Question answered flag toggled");
        Ok(question.clone())
    }

    pub fn toggle_pinned(&mut self, question_id: &QuestionId) -> Result<QAQuestion> {
        let question = self.get_mut(question_id)?;
        question.pinned = !question.pinned;

        info!(question_id = %question.id, pinned = question.pinned, "Question pinned flag toggled");
        Ok(question.clone())
    }

    pub fn delete_question(&mut self, question_id: &QuestionId) -> Result<QAQuestion> {
        let index = self
            .questions
            .iter()
            .position(|q| &q.id == question_id)
            .ok_or_else(|| Error::NotFound(format!("Question {question_id} not found")))?;

        let removed = self.questions.remove(index);
        info!(question_id = %removed.id, "Question deleted");
        Ok(removed)
    }

    /// Display order: pinned questions, then unpinned, each in submission order
    pub fn list(&self) -> Vec<QAQuestion> {
        let pinned = self.questions.iter().filter(|q| q.pinned);
        let unpinned = self.questions.iter().filter(|q| !q.pinned);
        pinned.chain(unpinned).cloned().collect()
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&QAQuestion> {
        self.questions.iter().find(|q| &q.id == question_id)
    }

    fn get_mut(&mut self, question_id: &QuestionId) -> Result<&mut QAQuestion> {
        self.questions
            .iter_mut()
            .find(|q| &q.id == question_id)
            .ok_or_else(|| Error::NotFound(format!("Question {question_id} not found")))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
