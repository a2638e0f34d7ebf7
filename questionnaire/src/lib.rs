//! # questionnaire
//!
//! Let an automated agent pause and ask a human to fill in a questionnaire.
//!
//! The agent supplies a title, an author, an introduction and a list of
//! multiple-choice questions. A presentation surface shows the form, the
//! calling thread blocks until the human submits, and the answers come back
//! as one deterministic transcript.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use questionnaire::{Question, Questionnaire, Session};
//! use questionnaire_ratatui_form::RatatuiFormSurface;
//!
//! let questionnaire = Questionnaire::new(
//!     "Landing page",
//!     "Design agent",
//!     "A few questions before I start on the mockups.",
//! )
//! .with_question(Question::new("Which colors?", ["Red", "Blue", "Green"])?);
//!
//! let surface = RatatuiFormSurface::new();
//! let transcript = Session::open(questionnaire, &surface)?.await_result()?;
//! println!("{transcript}");
//! ```
//!
//! Agents that hand over raw JSON go through [`ask_client`], which fills in
//! the default title, author and introduction before validating. Async agent
//! hosts use [`ask_client_async`] or [`Session::wait`]; the blocking calls
//! refuse to run on a tokio runtime thread.
//!
//! ## Surfaces
//!
//! Surfaces are separate crates that implement `PresentationSurface`:
//! - `questionnaire-ratatui-form` - terminal form
//! - `questionnaire-egui-form` - desktop window form
//!
//! [`TestSurface`] answers sessions programmatically, for tests and automation.

// Re-export all types from questionnaire-types
pub use questionnaire_types::*;

mod session;
pub use session::{Session, SessionOptions};

mod tool;
pub use tool::{
    ClientQuestionnaire, DEFAULT_AUTHOR, DEFAULT_INTRODUCTION, DEFAULT_TITLE, TOOL_DESCRIPTION,
    TOOL_NAME, apply_defaults, ask_client, ask_client_async,
};

// Test surface for running sessions without a human
mod test_surface;
pub use test_surface::{TestSurface, TestSurfaceError, TestSurfaceHandle};
