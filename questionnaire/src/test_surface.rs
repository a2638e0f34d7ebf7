//! Test surface for running sessions without a human.
//!
//! `TestSurface` resolves the completion sink with a pre-defined outcome. It is
//! useful for testing agents that ask questions, and for automation where the
//! answers are known up front.
//!
//! # Example
//!
//! ```rust
//! use questionnaire::{Question, Questionnaire, Response, Selection, Session, TestSurface};
//!
//! let questionnaire = Questionnaire::new("T", "A", "I")
//!     .with_question(Question::new("Color?", ["Red", "Blue"]).unwrap());
//!
//! let surface = TestSurface::submitting(
//!     Response::new(vec![Selection::new().with_checked([1])]).with_comment("thanks"),
//! );
//!
//! let transcript = Session::open(questionnaire, &surface)
//!     .unwrap()
//!     .await_result()
//!     .unwrap();
//!
//! assert_eq!(
//!     transcript,
//!     "Client answers to the questionnaire \"T\":\n\nColor?\n  * Blue\n\nClient comments:\nthanks"
//! );
//! assert_eq!(surface.disposals(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::{Completion, CompletionSink, PresentationSurface, Questionnaire, Response};

/// What the test surface does once rendered.
#[derive(Debug, Clone)]
enum Script {
    Submit(Response),
    Abandon,
    /// Keep the sink alive without ever resolving it.
    Silent,
    /// Drop the sink without resolving it.
    DropSink,
    FailToRender(String),
}

/// A surface that returns a pre-configured outcome.
///
/// Clones share their render and disposal counters.
#[derive(Debug, Clone)]
pub struct TestSurface {
    script: Script,
    delay: Option<Duration>,
    duplicate: bool,
    renders: Arc<AtomicUsize>,
    disposals: Arc<AtomicUsize>,
}

/// Error type for TestSurface.
#[derive(Debug, thiserror::Error)]
pub enum TestSurfaceError {
    #[error("test surface failed to render: {0}")]
    Render(String),
}

/// Resources held by one rendered test form.
#[derive(Debug)]
pub struct TestSurfaceHandle {
    worker: Option<JoinHandle<()>>,
    _held: Option<CompletionSink>,
}

impl TestSurface {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: None,
            duplicate: false,
            renders: Arc::new(AtomicUsize::new(0)),
            disposals: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Submit the given response.
    pub fn submitting(response: Response) -> Self {
        Self::with_script(Script::Submit(response))
    }

    /// Close the form without submitting.
    pub fn abandoning() -> Self {
        Self::with_script(Script::Abandon)
    }

    /// Never resolve; the session only ends through its timeout.
    pub fn silent() -> Self {
        Self::with_script(Script::Silent)
    }

    /// Drop the completion sink without resolving it, like a crashed surface.
    pub fn dropping() -> Self {
        Self::with_script(Script::DropSink)
    }

    /// Fail in `render`, like a surface without an interactive environment.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::FailToRender(message.into()))
    }

    /// Deliver from a background thread after the given delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// After resolving, call both `submit` and `abandon` again.
    pub fn with_duplicate_completion(mut self) -> Self {
        self.duplicate = true;
        self
    }

    /// Number of times `render` succeeded.
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Number of times `dispose` ran.
    pub fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }
}

fn deliver(completion: Completion, duplicate: bool, sink: CompletionSink) {
    match completion {
        Completion::Submitted(response) => sink.submit(response),
        Completion::Abandoned => sink.abandon(),
    };

    if duplicate {
        sink.submit(Response::default());
        sink.abandon();
    }
}

impl PresentationSurface for TestSurface {
    type Handle = TestSurfaceHandle;
    type Error = TestSurfaceError;

    fn render(
        &self,
        _questionnaire: &Questionnaire,
        sink: CompletionSink,
    ) -> Result<Self::Handle, Self::Error> {
        let completion = match &self.script {
            Script::FailToRender(message) => {
                return Err(TestSurfaceError::Render(message.clone()));
            }
            Script::Submit(response) => Completion::Submitted(response.clone()),
            Script::Abandon => Completion::Abandoned,
            Script::Silent => {
                self.renders.fetch_add(1, Ordering::SeqCst);
                return Ok(TestSurfaceHandle {
                    worker: None,
                    _held: Some(sink),
                });
            }
            Script::DropSink => {
                self.renders.fetch_add(1, Ordering::SeqCst);
                drop(sink);
                return Ok(TestSurfaceHandle {
                    worker: None,
                    _held: None,
                });
            }
        };
        self.renders.fetch_add(1, Ordering::SeqCst);

        let duplicate = self.duplicate;
        let worker = match self.delay {
            Some(delay) => Some(thread::spawn(move || {
                thread::sleep(delay);
                deliver(completion, duplicate, sink);
            })),
            None => {
                deliver(completion, duplicate, sink);
                None
            }
        };

        Ok(TestSurfaceHandle {
            worker,
            _held: None,
        })
    }

    fn dispose(&self, mut handle: Self::Handle) {
        if let Some(worker) = handle.worker.take() {
            let _ = worker.join();
        }
        self.disposals.fetch_add(1, Ordering::SeqCst);
    }
}
