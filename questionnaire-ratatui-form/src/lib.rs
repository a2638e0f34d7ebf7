//! # questionnaire-ratatui-form
//!
//! Ratatui form surface for questionnaire.
//!
//! This surface displays the whole questionnaire at once in a scrollable TUI
//! form drawn on stderr. Users move between options and text fields with
//! Tab/Shift+Tab or the arrow keys, check options with Space, and submit with
//! the button at the bottom or F10. Esc closes the form without submitting.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use questionnaire::{Question, Questionnaire, Session};
//! use questionnaire_ratatui_form::RatatuiFormSurface;
//!
//! fn main() -> anyhow::Result<()> {
//!     let questionnaire = Questionnaire::new("Kickoff", "PM agent", "Quick questions.")
//!         .with_question(Question::new("Which pages first?", ["Home", "Pricing"])?);
//!
//!     let surface = RatatuiFormSurface::new();
//!     let transcript = Session::open(questionnaire, &surface)?.await_result()?;
//!     println!("{transcript}");
//!     Ok(())
//! }
//! ```

mod backend;
mod form;

pub use backend::{RatatuiFormError, RatatuiFormHandle, RatatuiFormSurface, Theme};
