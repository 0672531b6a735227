use crate::chat::ChatPhase;

/// Errors surfaced by the dashboard core.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Query was empty after trimming.
    #[error("query is empty")]
    EmptyQuery,

    /// A chat is already waiting for or streaming a reply.
    #[error("chat is busy ({0:?})")]
    Busy(ChatPhase),

    /// Operation is not valid in the current chat phase.
    #[error("cannot {action} while {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: ChatPhase,
    },

    /// Embedded fixture data could not be loaded.
    #[error("fixture {name}: {reason}")]
    Fixture { name: &'static str, reason: String },

    /// A fixture id points at a record that does not exist.
    #[error("{owner} references unknown {kind} '{id}'")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        id: String,
    },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DashboardError {
    /// True for errors caused by user input rather than broken data.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::Busy(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
