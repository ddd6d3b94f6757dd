//! Voice bridge over an injected speech-capture capability.

use std::sync::Arc;

use parley_core::error::{ParleyError, Result};
use parley_core::types::CaptureEndReason;

use crate::state::{CaptureState, StateMachine};

/// A platform speech recognizer: single-shot, non-continuous, no interim
/// results, one fixed language.
///
/// `begin` starts one capture session; the platform glue later reports the
/// terminal event through `VoiceBridge::finish`. `cancel` aborts an
/// in-progress session and must be safe to call when nothing is running.
pub trait SpeechRecognizer: Send + Sync {
    fn begin(&self) -> Result<()>;
    fn cancel(&self);
    /// BCP 47 tag the recognizer was constructed with.
    fn language(&self) -> &str;
}

/// Resolved speech capability, decided once at construction.
#[derive(Clone)]
pub enum SpeechCapability {
    Available(Arc<dyn SpeechRecognizer>),
    Unavailable,
}

impl SpeechCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, SpeechCapability::Available(_))
    }
}

/// Terminal event of a capture session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The recognizer produced a final transcript.
    Transcript(String),
    /// The capture ended without recognizable speech.
    NoSpeech,
    /// The recognizer reported an error.
    Error(String),
    /// The user stopped the capture manually.
    Cancelled,
}

impl CaptureOutcome {
    /// The reason recorded in the session event stream.
    pub fn end_reason(&self) -> CaptureEndReason {
        match self {
            CaptureOutcome::Transcript(_) => CaptureEndReason::Transcript,
            CaptureOutcome::NoSpeech => CaptureEndReason::NoSpeech,
            CaptureOutcome::Error(_) => CaptureEndReason::Error,
            CaptureOutcome::Cancelled => CaptureEndReason::Cancelled,
        }
    }
}

/// Bridges the capture lifecycle into the text-input path.
///
/// State machine: Idle --start--> Listening --(result | error | end |
/// manual stop)--> Idle. A start request while already Listening is a
/// no-op; the host toggles, it does not re-request.
pub struct VoiceBridge {
    capability: SpeechCapability,
    state: StateMachine,
}

impl VoiceBridge {
    pub fn new(capability: SpeechCapability) -> Self {
        Self {
            capability,
            state: StateMachine::new(),
        }
    }

    /// True while a capture session is listening (the recording flag).
    pub fn is_recording(&self) -> bool {
        self.state.current() == CaptureState::Listening
    }

    /// Whether the platform supports speech capture at all.
    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    /// Begin listening.
    ///
    /// Returns `VoiceUnsupported` when no platform capability exists; the
    /// host surfaces that as a blocking notice and no state changes. A
    /// request while already Listening succeeds without doing anything.
    pub fn start_capture(&self) -> Result<()> {
        let recognizer = match &self.capability {
            SpeechCapability::Available(r) => Arc::clone(r),
            SpeechCapability::Unavailable => return Err(ParleyError::VoiceUnsupported),
        };

        if self.state.current() == CaptureState::Listening {
            tracing::debug!("Capture already listening; start request ignored");
            return Ok(());
        }

        recognizer.begin()?;
        self.state.transition(CaptureState::Listening)?;
        tracing::info!(language = recognizer.language(), "Voice capture started");
        Ok(())
    }

    /// User-initiated cancellation. Ends the session immediately; whatever
    /// partial input buffer exists is left as-is. Idle is a no-op.
    pub fn stop_capture(&self) {
        if self.state.current() != CaptureState::Listening {
            return;
        }
        if let SpeechCapability::Available(recognizer) = &self.capability {
            recognizer.cancel();
        }
        self.state.reset();
        tracing::info!("Voice capture stopped by user");
    }

    /// Apply the terminal event of a capture session.
    ///
    /// Converges the state to Idle on every path. Returns the transcript
    /// destined for the input buffer, if the outcome carried a non-empty
    /// one; the caller writes it there, never auto-sends.
    pub fn finish(&self, outcome: &CaptureOutcome) -> Option<String> {
        self.state.reset();
        match outcome {
            CaptureOutcome::Transcript(text) if !text.trim().is_empty() => {
                tracing::debug!(text_len = text.len(), "Capture produced transcript");
                Some(text.clone())
            }
            CaptureOutcome::Transcript(_) | CaptureOutcome::NoSpeech => {
                tracing::debug!("Capture ended without usable speech");
                None
            }
            CaptureOutcome::Error(reason) => {
                tracing::warn!(reason = %reason, "Capture ended with recognizer error");
                None
            }
            CaptureOutcome::Cancelled => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
