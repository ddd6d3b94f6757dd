//! Parley Voice crate - the speech capture bridge.
//!
//! Bridges a platform speech-capture capability (single-shot, no interim
//! results, fixed language) into the same text-input path typed entry
//! uses. The capability is resolved at construction; the bridge never
//! probes the platform at point of use.

pub mod bridge;
pub mod state;

pub use bridge::{CaptureOutcome, SpeechCapability, SpeechRecognizer, VoiceBridge};
pub use state::{CaptureState, StateMachine};
