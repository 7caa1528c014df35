use std::fmt;
use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of one probe session.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Resolving,
    Connecting,
    Greeted,
    ConnectFailed,
    TimedOut,
    Closed,
}

/// Step whose timeout fired.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    Resolve,
    Connect,
    Greeting,
    Idle,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve => f.write_str("host resolution"),
            Self::Connect => f.write_str("connect"),
            Self::Greeting => f.write_str("greeting"),
            Self::Idle => f.write_str("socket idle"),
        }
    }
}

/// A raw SMTP reply, preserving the numeric status code and message lines.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

/// Result of a banner probe.
///
/// Only `Greeted` counts as reachable. The other variants carry enough detail
/// for a diagnostic string; none of them is an error for the caller.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Greeted {
        host: String,
        banner: String,
    },
    Blocked {
        host: String,
        reason: String,
    },
    TimedOut {
        host: String,
        stage: ProbeStage,
        after: Duration,
    },
    ResolutionError {
        reason: String,
    },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Greeted { .. })
    }

    /// State the session was in when it was torn down.
    pub fn terminal_state(&self) -> ProbeState {
        match self {
            Self::Greeted { .. } => ProbeState::Greeted,
            Self::Blocked { .. } => ProbeState::ConnectFailed,
            Self::TimedOut { .. } => ProbeState::TimedOut,
            Self::ResolutionError { .. } => ProbeState::Resolving,
        }
    }

    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Greeted { .. } => None,
            Self::Blocked { host, reason } => Some(format!("{host}: {reason}")),
            Self::TimedOut { host, stage, after } => Some(format!(
                "{host}: {stage} timed out after {}ms",
                after.as_millis()
            )),
            Self::ResolutionError { reason } => Some(reason.clone()),
        }
    }
}
