//! Core types for the questionnaire crate.
//!
//! This crate provides the foundational types for asking a human to fill in a questionnaire:
//! - `Questionnaire` and `Question` - The immutable schema presented to the human
//! - `Response` and `Selection` - What the human checked and typed
//! - `ViewNode` and `layout` - Plain render instructions consumed by presentation surfaces
//! - `format_transcript` - The canonical text handed back to the calling agent
//! - `PresentationSurface` and `CompletionSink` - The seam between a session and its surface

mod question;
pub use question::{Question, Questionnaire};

mod schema;
pub use schema::validate;

mod response;
pub use response::{Response, ResponseError, Selection};

mod view;
pub use view::{COMMENT_PROMPT, SUBMIT_LABEL, ViewNode, layout};

mod transcript;
pub use transcript::{COMMENTS_HEADING, format_transcript};

mod sink;
pub use sink::{Completion, CompletionSink, completion_channel};

mod state;
pub use state::SessionState;

mod error;
pub use error::{EmptyQuestionText, SchemaError, SessionError};

mod traits;
pub use traits::PresentationSurface;
