use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Questionnaire;

/// Error type for responses that do not fit their questionnaire.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("question {question} has {available} options, but option {option} is checked")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        available: usize,
    },
}

/// One question's captured answer: checked option indices plus optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Indices into the question's options.
    #[serde(default)]
    pub checked: BTreeSet<usize>,

    /// Free text entered in addition to, or instead of, the checked options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the given option indices.
    pub fn with_checked(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.checked.extend(indices);
        self
    }

    /// Set the free text.
    pub fn with_custom_text(mut self, text: impl Into<String>) -> Self {
        self.custom_text = Some(text.into());
        self
    }

    /// Replace the free text.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = Some(text.into());
    }

    pub fn check(&mut self, option: usize) {
        self.checked.insert(option);
    }

    pub fn uncheck(&mut self, option: usize) {
        self.checked.remove(&option);
    }

    /// Flip the given option, returning whether it is now checked.
    pub fn toggle(&mut self, option: usize) -> bool {
        if !self.checked.remove(&option) {
            self.checked.insert(option);
            true
        } else {
            false
        }
    }

    pub fn is_checked(&self, option: usize) -> bool {
        self.checked.contains(&option)
    }

    /// The free text with surrounding whitespace removed, or `None` if nothing is left.
    pub fn trimmed_custom_text(&self) -> Option<&str> {
        non_blank(self.custom_text.as_deref())
    }

    /// Check if nothing was checked or typed.
    pub fn is_blank(&self) -> bool {
        self.checked.is_empty() && self.trimmed_custom_text().is_none()
    }
}

/// A human's complete answer to a questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// One selection per question, in questionnaire order.
    #[serde(default)]
    pub answers: Vec<Selection>,

    /// Closing remark not tied to any question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Response {
    /// Create a response from the given selections.
    pub fn new(answers: Vec<Selection>) -> Self {
        Self {
            answers,
            comment: None,
        }
    }

    /// Create a response with one empty selection per question.
    pub fn blank(questionnaire: &Questionnaire) -> Self {
        Self::new(vec![Selection::new(); questionnaire.len()])
    }

    /// Set the closing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Get the selection for the question at the given index.
    pub fn selection(&self, question: usize) -> Option<&Selection> {
        self.answers.get(question)
    }

    /// Get a mutable reference to the selection for the question at the given index.
    pub fn selection_mut(&mut self, question: usize) -> Option<&mut Selection> {
        self.answers.get_mut(question)
    }

    /// The comment with surrounding whitespace removed, or `None` if nothing is left.
    pub fn trimmed_comment(&self) -> Option<&str> {
        non_blank(self.comment.as_deref())
    }

    /// Check that this response structurally matches the questionnaire:
    /// one selection per question and every checked index names an existing option.
    pub fn check_against(&self, questionnaire: &Questionnaire) -> Result<(), ResponseError> {
        if self.answers.len() != questionnaire.len() {
            return Err(ResponseError::AnswerCountMismatch {
                expected: questionnaire.len(),
                actual: self.answers.len(),
            });
        }

        for (index, (selection, question)) in self
            .answers
            .iter()
            .zip(questionnaire.questions())
            .enumerate()
        {
            let available = question.options().len();
            // Sorted set: reports the smallest offending index.
            if let Some(&option) = selection.checked.iter().find(|&&option| option >= available) {
                return Err(ResponseError::OptionOutOfRange {
                    question: index,
                    option,
                    available,
                });
            }
        }

        Ok(())
    }
}

pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}
