use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::CaptureEndReason;

/// All session events the core emits toward the host UI.
///
/// Events are emitted by the session manager after state changes and
/// consumed by:
/// - The host's broadcast subscription (close-request, re-render hints)
/// - The event log (for audit/debugging)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SessionEvent {
    /// A fresh session was seeded with a synthesized greeting.
    GreetingSeeded {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// A user utterance was accepted and a reply call was issued.
    UtteranceSubmitted {
        session_id: Uuid,
        seq: u64,
        chars: usize,
        timestamp: DateTime<Utc>,
    },

    /// A reply settled successfully and was appended to history.
    ReplyApplied {
        session_id: Uuid,
        seq: u64,
        option_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A reply settled after a newer utterance had been issued and was
    /// discarded without touching history.
    StaleReplyDiscarded {
        session_id: Uuid,
        seq: u64,
        newest_seq: u64,
        timestamp: DateTime<Utc>,
    },

    /// The reply call failed and the fallback message was appended.
    TransportFailed {
        session_id: Uuid,
        seq: u64,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A voice capture session began listening.
    CaptureStarted {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// A voice capture session ended.
    CaptureEnded {
        session_id: Uuid,
        reason: CaptureEndReason,
        timestamp: DateTime<Utc>,
    },

    /// Persisted history was cleared by the unload hook.
    HistoryCleared {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// The user asked to close the widget; the host should hide it.
    CloseRequested {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },
}

impl SessionEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::GreetingSeeded { timestamp, .. }
            | SessionEvent::UtteranceSubmitted { timestamp, .. }
            | SessionEvent::ReplyApplied { timestamp, .. }
            | SessionEvent::StaleReplyDiscarded { timestamp, .. }
            | SessionEvent::TransportFailed { timestamp, .. }
            | SessionEvent::CaptureStarted { timestamp, .. }
            | SessionEvent::CaptureEnded { timestamp, .. }
            | SessionEvent::HistoryCleared { timestamp, .. }
            | SessionEvent::CloseRequested { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a human-readable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            SessionEvent::GreetingSeeded { .. } => "greeting_seeded",
            SessionEvent::UtteranceSubmitted { .. } => "utterance_submitted",
            SessionEvent::ReplyApplied { .. } => "reply_applied",
            SessionEvent::StaleReplyDiscarded { .. } => "stale_reply_discarded",
            SessionEvent::TransportFailed { .. } => "transport_failed",
            SessionEvent::CaptureStarted { .. } => "capture_started",
            SessionEvent::CaptureEnded { .. } => "capture_ended",
            SessionEvent::HistoryCleared { .. } => "history_cleared",
            SessionEvent::CloseRequested { .. } => "close_requested",
        }
    }
}
