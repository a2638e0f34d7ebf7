use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::Response;

/// How a surface finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The human pressed submit; ownership of the response moves to the session.
    Submitted(Response),

    /// The surface was closed without submitting.
    Abandoned,
}

/// Single-use completion callback handed to a presentation surface.
///
/// Clones share the same slot: whichever clone resolves first wins and every
/// later call is discarded. If all clones are dropped unresolved the waiting
/// session treats it as abandonment.
#[derive(Debug, Clone)]
pub struct CompletionSink {
    sender: Arc<Mutex<Option<oneshot::Sender<Completion>>>>,
}

/// Create a connected sink and receiver.
pub fn completion_channel() -> (CompletionSink, oneshot::Receiver<Completion>) {
    let (sender, receiver) = oneshot::channel();
    (
        CompletionSink {
            sender: Arc::new(Mutex::new(Some(sender))),
        },
        receiver,
    )
}

impl CompletionSink {
    /// Deliver the human's response.
    ///
    /// Returns `false` if the sink was already resolved; the response is dropped.
    pub fn submit(&self, response: Response) -> bool {
        self.complete(Completion::Submitted(response))
    }

    /// Report that the surface closed without a submission.
    ///
    /// Returns `false` if the sink was already resolved.
    pub fn abandon(&self) -> bool {
        self.complete(Completion::Abandoned)
    }

    /// Check if a completion has already been delivered.
    pub fn is_resolved(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn complete(&self, completion: Completion) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(sender) = sender else {
            tracing::warn!(?completion, "discarding duplicate questionnaire completion");
            return false;
        };

        if sender.send(completion).is_err() {
            tracing::debug!("questionnaire session went away before completion arrived");
        }
        true
    }
}
