use std::fmt;

/// Lifecycle of a questionnaire session.
///
/// A session starts `Pending` and moves to exactly one of the other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Pending,
    Submitted,
    Abandoned,
}

impl SessionState {
    /// Check if the session has left `Pending`.
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Abandoned => "abandoned",
        };
        f.write_str(name)
    }
}
