//! # questionnaire-egui-form
//!
//! An egui form surface for questionnaire that shows the questionnaire in a
//! desktop window.
//!
//! This surface uses the `eframe` and `egui` crates. Every question is
//! displayed at once and can be answered in any order. Closing the window
//! without pressing submit abandons the session.
//!
//! The window runs on the thread that opens the session, which on most
//! platforms has to be the main thread. A session timeout cannot close the
//! window early; the human finishes or closes it first.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use questionnaire::{Question, Questionnaire, Session};
//! use questionnaire_egui_form::EguiFormSurface;
//!
//! fn main() -> anyhow::Result<()> {
//!     let questionnaire = Questionnaire::new("Kickoff", "PM agent", "Quick questions.")
//!         .with_question(Question::new("Which pages first?", ["Home", "Pricing"])?);
//!
//!     let surface = EguiFormSurface::new().with_window_size([480.0, 640.0]);
//!     let transcript = Session::open(questionnaire, &surface)?.await_result()?;
//!     println!("{transcript}");
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{EguiFormError, EguiFormHandle, EguiFormSurface};
