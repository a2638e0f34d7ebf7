//! Adapter between an agent framework's tool call and a questionnaire session.

use serde_json::Value;

use crate::session::ensure_blocking_allowed;
use crate::{PresentationSurface, Questionnaire, Session, SessionError, SessionOptions};

pub const TOOL_NAME: &str = "Client Questionnaire Tool";

pub const TOOL_DESCRIPTION: &str = "Collects answers from a human client through a form. \
Provide a title, an author, a short introduction and a list of questions, each with the \
options the client may check. The client may also type free text per question and leave a \
closing comment. Returns a transcript of everything the client selected or typed.";

pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_AUTHOR: &str = "No author";
pub const DEFAULT_INTRODUCTION: &str = "No introduction";

/// Fill in `title`, `author` and `introduction` when the agent left them out.
///
/// Non-object input is left alone so validation can report it.
pub fn apply_defaults(raw: &mut Value) {
    let Some(object) = raw.as_object_mut() else {
        return;
    };

    for (field, default) in [
        ("title", DEFAULT_TITLE),
        ("author", DEFAULT_AUTHOR),
        ("introduction", DEFAULT_INTRODUCTION),
    ] {
        let slot = object.entry(field).or_insert(Value::Null);
        if slot.is_null() {
            *slot = Value::String(default.to_string());
        }
    }
}

fn prepare(mut raw: Value) -> Result<Questionnaire, SessionError> {
    apply_defaults(&mut raw);
    Ok(Questionnaire::from_value(&raw)?)
}

/// Ask a human to fill in the raw questionnaire and return the transcript.
///
/// Blocks the calling thread. Schema errors are reported before anything is
/// shown. Inside a tokio runtime this fails with
/// [`SessionError::BlockingInRuntime`] without rendering; use
/// [`ask_client_async`] there.
pub fn ask_client<S: PresentationSurface>(
    raw: Value,
    surface: &S,
    options: SessionOptions,
) -> Result<String, SessionError> {
    let questionnaire = prepare(raw)?;
    ensure_blocking_allowed()?;
    Session::open_with(questionnaire, surface, options)?.await_result()
}

/// Like [`ask_client`], for async agent hosts.
///
/// The surface still renders on the calling task. Surfaces that block in
/// `render` (the egui window) belong on a blocking thread.
pub async fn ask_client_async<S: PresentationSurface>(
    raw: Value,
    surface: &S,
    options: SessionOptions,
) -> Result<String, SessionError> {
    let questionnaire = prepare(raw)?;
    Session::open_with(questionnaire, surface, options)?
        .wait()
        .await
}

/// A surface bundled with session options, ready to be registered as a tool.
#[derive(Debug, Clone)]
pub struct ClientQuestionnaire<S> {
    surface: S,
    options: SessionOptions,
}

impl<S: PresentationSurface> ClientQuestionnaire<S> {
    pub const NAME: &'static str = TOOL_NAME;
    pub const DESCRIPTION: &'static str = TOOL_DESCRIPTION;

    pub fn new(surface: S) -> Self {
        Self {
            surface,
            options: SessionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run one tool invocation, blocking the calling thread.
    ///
    /// Fails with [`SessionError::BlockingInRuntime`] inside a tokio runtime.
    pub fn run(&self, raw: Value) -> Result<String, SessionError> {
        ask_client(raw, &self.surface, self.options)
    }

    /// Run one tool invocation from an async host.
    pub async fn run_async(&self, raw: Value) -> Result<String, SessionError> {
        ask_client_async(raw, &self.surface, self.options).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_fill_missing_and_null_fields() {
        let mut raw = json!({ "title": "Kickoff", "author": null, "questions": [] });
        apply_defaults(&mut raw);
        assert_eq!(
            raw,
            json!({
                "title": "Kickoff",
                "author": DEFAULT_AUTHOR,
                "introduction": DEFAULT_INTRODUCTION,
                "questions": [],
            })
        );
    }

    #[test]
    fn defaults_leave_wrong_types_for_validation() {
        let mut raw = json!({ "title": 5, "questions": [] });
        apply_defaults(&mut raw);
        assert_eq!(raw["title"], json!(5));

        let mut not_an_object = json!("hello");
        apply_defaults(&mut not_an_object);
        assert_eq!(not_an_object, json!("hello"));
    }
}
