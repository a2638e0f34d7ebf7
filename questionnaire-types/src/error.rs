use std::time::Duration;

use crate::ResponseError;

/// Error type for malformed questionnaire input.
///
/// Question and option positions are zero-based.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("questionnaire must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}, got {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("question {index} must be an object, got {found}")]
    QuestionNotAnObject { index: usize, found: &'static str },

    #[error("question {index} has no `question` text")]
    MissingQuestionText { index: usize },

    #[error("question {index}: `question` must be a string, got {found}")]
    InvalidQuestionText { index: usize, found: &'static str },

    #[error("question {index}: `question` text is empty")]
    EmptyQuestion { index: usize },

    #[error("question {index}: `options` must be an array, got {found}")]
    OptionsNotAnArray { index: usize, found: &'static str },

    #[error("question {question}, option {option}: must be a string, got {found}")]
    OptionNotAString {
        question: usize,
        option: usize,
        found: &'static str,
    },
}

/// A question was built with blank text.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("question text is empty")]
pub struct EmptyQuestionText;

/// Error type for a questionnaire session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The questionnaire was rejected before any surface was created.
    #[error("invalid questionnaire: {0}")]
    Schema(#[from] SchemaError),

    /// The human closed the form without submitting.
    #[error("human closed the form without submitting")]
    Abandoned,

    /// Nobody submitted within the configured timeout.
    #[error("no submission within {0:?}")]
    TimedOut(Duration),

    /// Surface-specific failure (no terminal, no display, UI framework crash, etc.)
    #[error("presentation surface error: {0}")]
    Surface(#[from] anyhow::Error),

    /// The surface submitted a response that does not fit the questionnaire.
    #[error("surface submitted a mismatched response: {0}")]
    InvalidResponse(#[from] ResponseError),

    /// The timer backing a session timeout could not be started.
    #[error("failed to start session timer: {0}")]
    Timer(#[source] std::io::Error),

    /// A blocking wait was requested from inside an async runtime.
    #[error("cannot block on a questionnaire session inside an async runtime, use the async API")]
    BlockingInRuntime,
}

impl SessionError {
    /// Create a surface error from any error type.
    pub fn surface(err: impl Into<anyhow::Error>) -> Self {
        Self::Surface(err.into())
    }

    /// Check if this error represents the human walking away.
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned)
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }
}
