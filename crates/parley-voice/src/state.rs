//! Capture state machine with thread-safe transitions.
//!
//! Enforces the capture lifecycle:
//! - Idle -> Listening (start capture)
//! - Listening -> Idle (final result, error, natural end, or manual stop)
//!
//! No nested or overlapping capture sessions exist; every terminal event
//! converges on Idle.

use std::fmt;
use std::sync::{Arc, Mutex};

use parley_core::error::ParleyError;

/// Operational state of the voice bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    /// No capture in progress. Ready to start.
    Idle,
    /// Actively listening for speech input.
    Listening,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Listening => write!(f, "Listening"),
        }
    }
}

impl CaptureState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &CaptureState) -> bool {
        matches!(
            (self, target),
            (CaptureState::Idle, CaptureState::Listening)
                | (CaptureState::Listening, CaptureState::Idle)
        )
    }
}

/// Thread-safe state machine for capture transitions.
///
/// Wraps `CaptureState` in an `Arc<Mutex<>>` so clones observe the same
/// state. Transitions are validated before being applied.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<CaptureState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CaptureState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> CaptureState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: CaptureState) -> Result<(), ParleyError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Capture state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(ParleyError::Voice(format!(
                "invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }

    /// Force the state machine back to Idle (error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state != CaptureState::Idle {
            tracing::warn!("Capture state machine reset to Idle from {}", *state);
        }
        *state = CaptureState::Idle;
    }
}

// =============================================================================
// Tests
// =============================================================================
