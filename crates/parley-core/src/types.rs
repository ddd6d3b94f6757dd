use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a message in the conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The visitor typing (or speaking) into the widget.
    User,
    /// The remote question-answering service.
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// How a voice capture session ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureEndReason {
    /// A final transcript was produced.
    Transcript,
    /// The capture finished without recognizable speech.
    NoSpeech,
    /// The platform recognizer reported an error.
    Error,
    /// The user stopped the capture manually.
    Cancelled,
}

// =============================================================================
// Messages
// =============================================================================

/// A single exchanged message. Immutable once created; the history log
/// only ever appends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    /// Create a message from the visitor.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Create a message from the remote service.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

// =============================================================================
// Quick-reply options
// =============================================================================

/// A backend-suggested canned follow-up the visitor can select instead of
/// typing.
///
/// The backend may attach fields beyond `label`; those are captured into
/// `extra` on deserialization and reproduced verbatim on serialization.
/// Nothing in this crate ever inspects `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickOption {
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuickOption {
    /// Create an option carrying only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extra: Map::new(),
        }
    }
}

// =============================================================================
// Session snapshot
// =============================================================================

/// Read-only view of session state handed to the host UI on each render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Exchanged messages in display order.
    pub messages: Vec<Message>,
    /// Current contents of the input field.
    pub input: String,
    /// True while a reply call is outstanding.
    pub typing: bool,
    /// True while a voice capture session is listening.
    pub recording: bool,
    /// Quick-reply options from the most recent reply, if any.
    pub options: Vec<QuickOption>,
}

// =============================================================================
// Tests
// =============================================================================
