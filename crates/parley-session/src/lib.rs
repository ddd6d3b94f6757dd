//! Parley Session crate - the conversational session manager.
//!
//! Wires history, transport, and voice into one component the host UI
//! drives with intents (submit, select option, toggle recording, request
//! close) and observes through snapshots and broadcast events.

pub mod intents;
pub mod manager;

pub use intents::{intent_for_key, intent_for_pointer_down, UiIntent, WidgetBounds};
pub use manager::{SessionManager, SubmitOutcome, FALLBACK_REPLY};
