//! One bounded human interaction, from an accepted questionnaire to a transcript.

use std::time::Duration;

use questionnaire_types::{
    Completion, PresentationSurface, Questionnaire, SessionError, SessionState,
    completion_channel, format_transcript,
};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// How long to wait for the human. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl SessionOptions {
    /// Create options that wait indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up after the given duration.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A questionnaire being shown on a presentation surface.
///
/// Created by [`Session::open`], finished by [`Session::await_result`] (or
/// [`Session::wait`] from async code). Both consume the session, so each
/// session produces exactly one outcome. The surface is disposed when the
/// session finishes or is dropped, whichever path is taken.
pub struct Session<'s, S: PresentationSurface> {
    questionnaire: Questionnaire,
    receiver: oneshot::Receiver<Completion>,
    /// Completion observed by `state()` before the caller started waiting.
    early: Option<Completion>,
    options: SessionOptions,
    surface: SurfaceGuard<'s, S>,
}

/// Disposes the rendered surface on every exit path.
struct SurfaceGuard<'s, S: PresentationSurface> {
    surface: &'s S,
    handle: Option<S::Handle>,
}

impl<S: PresentationSurface> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("disposing presentation surface");
            self.surface.dispose(handle);
        }
    }
}

/// What the wait produced.
enum Waited {
    Completed(Completion),
    /// Every sink clone was dropped without resolving.
    Orphaned,
    TimedOut(Duration),
}

impl<'s, S: PresentationSurface> Session<'s, S> {
    /// Render the questionnaire on the surface and start waiting for the human.
    pub fn open(questionnaire: Questionnaire, surface: &'s S) -> Result<Self, SessionError> {
        Self::open_with(questionnaire, surface, SessionOptions::default())
    }

    /// Like [`Session::open`], with explicit options.
    pub fn open_with(
        questionnaire: Questionnaire,
        surface: &'s S,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        debug!(
            title = questionnaire.title(),
            questions = questionnaire.len(),
            timeout = ?options.timeout,
            "opening questionnaire session"
        );

        let (sink, receiver) = completion_channel();
        let handle = surface
            .render(&questionnaire, sink)
            .map_err(SessionError::surface)?;

        Ok(Self {
            questionnaire,
            receiver,
            early: None,
            options,
            surface: SurfaceGuard {
                surface,
                handle: Some(handle),
            },
        })
    }

    /// Get the questionnaire being shown.
    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Check where the session stands without blocking.
    pub fn state(&mut self) -> SessionState {
        if self.early.is_none() {
            match self.receiver.try_recv() {
                Ok(completion) => self.early = Some(completion),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => self.early = Some(Completion::Abandoned),
            }
        }

        match &self.early {
            None => SessionState::Pending,
            Some(Completion::Submitted(_)) => SessionState::Submitted,
            Some(Completion::Abandoned) => SessionState::Abandoned,
        }
    }

    /// Block the calling thread until the human submits or walks away.
    ///
    /// Returns the transcript on submission and [`SessionError::Abandoned`]
    /// when the form was closed without submitting. Called from inside a
    /// tokio runtime it fails with [`SessionError::BlockingInRuntime`] and
    /// disposes the surface; use [`Session::wait`] there.
    pub fn await_result(self) -> Result<String, SessionError> {
        ensure_blocking_allowed()?;

        let Self {
            questionnaire,
            receiver,
            early,
            options,
            surface,
        } = self;

        let waited = match (early, options.timeout) {
            (Some(completion), _) => Waited::Completed(completion),
            (None, None) => match receiver.blocking_recv() {
                Ok(completion) => Waited::Completed(completion),
                Err(_) => Waited::Orphaned,
            },
            (None, Some(limit)) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .map_err(SessionError::Timer)?;
                runtime.block_on(wait_with_limit(receiver, limit))
            }
        };

        finish(&questionnaire, waited, surface)
    }

    /// Wait for the human from async code.
    pub async fn wait(self) -> Result<String, SessionError> {
        let Self {
            questionnaire,
            receiver,
            early,
            options,
            surface,
        } = self;

        let waited = match (early, options.timeout) {
            (Some(completion), _) => Waited::Completed(completion),
            (None, None) => match receiver.await {
                Ok(completion) => Waited::Completed(completion),
                Err(_) => Waited::Orphaned,
            },
            (None, Some(limit)) => wait_with_limit(receiver, limit).await,
        };

        finish(&questionnaire, waited, surface)
    }
}

/// Blocking on a tokio runtime thread would panic, so refuse up front.
pub(crate) fn ensure_blocking_allowed() -> Result<(), SessionError> {
    match tokio::runtime::Handle::try_current() {
        Ok(_) => {
            warn!("blocking questionnaire wait requested inside an async runtime");
            Err(SessionError::BlockingInRuntime)
        }
        Err(_) => Ok(()),
    }
}

async fn wait_with_limit(receiver: oneshot::Receiver<Completion>, limit: Duration) -> Waited {
    match tokio::time::timeout(limit, receiver).await {
        Ok(Ok(completion)) => Waited::Completed(completion),
        Ok(Err(_)) => Waited::Orphaned,
        Err(_) => Waited::TimedOut(limit),
    }
}

/// Turn the outcome into a transcript, disposing the surface on the way out.
fn finish<S: PresentationSurface>(
    questionnaire: &Questionnaire,
    waited: Waited,
    surface: SurfaceGuard<'_, S>,
) -> Result<String, SessionError> {
    let result = match waited {
        Waited::Completed(Completion::Submitted(response)) => {
            match response.check_against(questionnaire) {
                Ok(()) => {
                    debug!(state = %SessionState::Submitted, "questionnaire submitted");
                    Ok(format_transcript(questionnaire, &response))
                }
                Err(err) => {
                    warn!(error = %err, "surface submitted a response that does not fit the questionnaire");
                    Err(SessionError::InvalidResponse(err))
                }
            }
        }
        Waited::Completed(Completion::Abandoned) => {
            debug!(state = %SessionState::Abandoned, "questionnaire closed without submitting");
            Err(SessionError::Abandoned)
        }
        Waited::Orphaned => {
            warn!("surface dropped its completion sink without resolving it");
            Err(SessionError::Abandoned)
        }
        Waited::TimedOut(limit) => {
            debug!(state = %SessionState::Abandoned, ?limit, "questionnaire timed out");
            Err(SessionError::TimedOut(limit))
        }
    };

    drop(surface);
    result
}
