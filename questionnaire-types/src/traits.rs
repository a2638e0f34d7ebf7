use crate::{CompletionSink, Questionnaire};

/// Trait for surfaces that show a questionnaire to a human.
///
/// Surfaces receive a `Questionnaire` and a `CompletionSink`. They decide how
/// to present the form (terminal, desktop window, scripted answers, etc.) and
/// resolve the sink exactly once: `submit` when the human submits, `abandon`
/// when the form is closed without submitting.
///
/// A surface may run its own event loop on another thread and return from
/// `render` right away, or run the whole interaction inside `render` and
/// resolve the sink before returning.
pub trait PresentationSurface {
    /// Resources owned by one rendered form (thread handles, windows, etc.)
    type Handle;

    /// The error type for this surface.
    type Error: Into<anyhow::Error>;

    /// Show the questionnaire.
    ///
    /// # Returns
    /// * `Ok(handle)` once the form is up (or already finished)
    /// * `Err` if the surface cannot be initialized, e.g. no interactive environment
    fn render(
        &self,
        questionnaire: &Questionnaire,
        sink: CompletionSink,
    ) -> Result<Self::Handle, Self::Error>;

    /// Tear down the form and release its resources.
    ///
    /// Called exactly once per successful `render`, whether the session was
    /// submitted, abandoned, timed out or failed.
    fn dispose(&self, handle: Self::Handle);
}
