//! Session manager: central coordinator wiring history, transport, voice.
//!
//! Owns all mutable session state behind a mutex that is never held
//! across an await. Each user intent is atomic with respect to that
//! state; the transport call is the only suspension point.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::broadcast;
use uuid::Uuid;

use parley_core::config::ParleyConfig;
use parley_core::error::Result;
use parley_core::events::SessionEvent;
use parley_core::types::{Message, QuickOption, SessionSnapshot};
use parley_history::{HistoryLog, HistoryStore};
use parley_transport::ReplyTransport;
use parley_voice::{CaptureOutcome, SpeechCapability, VoiceBridge};

/// Fixed user-visible reply substituted when the transport call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I ran into a problem answering that. The service may be unavailable - please try again.";

/// Capacity of the host-facing event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// How a `submit` call resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; nothing happened.
    Rejected,
    /// The reply was appended and its options installed.
    Replied,
    /// The transport failed; the fallback message was appended.
    FallbackApplied,
    /// A newer utterance was issued mid-flight; this response was
    /// discarded without touching history.
    Superseded,
}

/// Mutable session state guarded by the manager's mutex.
struct SessionState {
    history: HistoryLog,
    input: String,
    typing: bool,
    options: Vec<QuickOption>,
    /// Sequence number of the most recently issued reply request.
    issued: u64,
}

/// The conversational session manager for one mounted widget.
///
/// Methods take `&self`; hosts share the manager behind an `Arc` and may
/// issue overlapping submits. Replies are applied in issuance order by
/// discarding any response that settles after a newer request was issued.
pub struct SessionManager {
    id: Uuid,
    user_id: String,
    transport: Arc<dyn ReplyTransport>,
    voice: VoiceBridge,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Mount a session: restore (or seed) history and resolve the voice
    /// capability.
    pub fn new(
        config: &ParleyConfig,
        store: Arc<dyn HistoryStore>,
        transport: Arc<dyn ReplyTransport>,
        capability: SpeechCapability,
    ) -> Self {
        let history = HistoryLog::open(store, &config.session.assistant_name);
        let seeded = history.started_fresh();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let manager = Self {
            id: Uuid::new_v4(),
            user_id: config.transport.user_id.clone(),
            transport,
            voice: VoiceBridge::new(capability),
            state: Mutex::new(SessionState {
                history,
                input: String::new(),
                typing: false,
                options: Vec::new(),
                issued: 0,
            }),
            events,
        };

        tracing::info!(session_id = %manager.id, restored = !seeded, "Session mounted");
        if seeded {
            manager.emit(SessionEvent::GreetingSeeded {
                session_id: manager.id,
                timestamp: Utc::now(),
            });
        }
        manager
    }

    /// Session identifier used in logs and events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Subscribe to host-facing session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Read-only view of the current session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().expect("state mutex poisoned");
        SessionSnapshot {
            messages: state.history.messages().to_vec(),
            input: state.input.clone(),
            typing: state.typing,
            recording: self.voice.is_recording(),
            options: state.options.clone(),
        }
    }

    /// Mirror the host's input field into the session buffer.
    pub fn set_input(&self, text: impl Into<String>) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.input = text.into();
    }

    /// Submit an utterance.
    ///
    /// Uses `text` when provided (a selected option's label), otherwise
    /// the live input buffer. Empty trimmed input is rejected silently
    /// with no state change and no network call. Otherwise: the user
    /// message is appended, input and quick-options are cleared, the
    /// typing flag goes up, and the reply call is issued. On settle the
    /// result is applied only if no newer utterance has been issued since.
    pub async fn submit(&self, text: Option<&str>) -> SubmitOutcome {
        let (seq, utterance) = {
            let mut state = self.state.lock().expect("state mutex poisoned");
            let utterance = match text {
                Some(t) => t.trim().to_string(),
                None => state.input.trim().to_string(),
            };
            if utterance.is_empty() {
                return SubmitOutcome::Rejected;
            }

            if let Err(e) = state.history.append(Message::user(utterance.clone())) {
                tracing::warn!(error = %e, "Failed to persist user message");
            }
            state.input.clear();
            state.options.clear();
            state.typing = true;
            state.issued += 1;
            (state.issued, utterance)
        };

        self.emit(SessionEvent::UtteranceSubmitted {
            session_id: self.id,
            seq,
            chars: utterance.chars().count(),
            timestamp: Utc::now(),
        });

        let result = self.transport.send_utterance(&utterance, &self.user_id).await;

        let (outcome, event) = {
            let mut state = self.state.lock().expect("state mutex poisoned");
            if seq != state.issued {
                tracing::debug!(seq, newest = state.issued, "Discarding stale reply");
                (
                    SubmitOutcome::Superseded,
                    SessionEvent::StaleReplyDiscarded {
                        session_id: self.id,
                        seq,
                        newest_seq: state.issued,
                        timestamp: Utc::now(),
                    },
                )
            } else {
                match result {
                    Ok(payload) => {
                        if let Err(e) = state.history.append(Message::bot(payload.reply)) {
                            tracing::warn!(error = %e, "Failed to persist bot reply");
                        }
                        let option_count = payload.options.len();
                        state.options = payload.options;
                        state.typing = false;
                        (
                            SubmitOutcome::Replied,
                            SessionEvent::ReplyApplied {
                                session_id: self.id,
                                seq,
                                option_count,
                                timestamp: Utc::now(),
                            },
                        )
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, seq, "Reply call failed; applying fallback");
                        if let Err(persist_err) =
                            state.history.append(Message::bot(FALLBACK_REPLY))
                        {
                            tracing::warn!(error = %persist_err, "Failed to persist fallback");
                        }
                        state.typing = false;
                        (
                            SubmitOutcome::FallbackApplied,
                            SessionEvent::TransportFailed {
                                session_id: self.id,
                                seq,
                                reason: e.to_string(),
                                timestamp: Utc::now(),
                            },
                        )
                    }
                }
            }
        };

        self.emit(event);
        outcome
    }

    /// Select a quick-reply option: equivalent to typing its label and
    /// submitting it. The option's opaque fields are never inspected.
    pub async fn select_option(&self, option: &QuickOption) -> SubmitOutcome {
        self.submit(Some(&option.label)).await
    }

    /// Start or stop voice capture.
    ///
    /// Propagates `VoiceUnsupported` for the host to surface as a
    /// blocking notice; the recording flag stays false in that case.
    pub fn toggle_recording(&self) -> Result<()> {
        if self.voice.is_recording() {
            self.voice.stop_capture();
            self.emit(SessionEvent::CaptureEnded {
                session_id: self.id,
                reason: CaptureOutcome::Cancelled.end_reason(),
                timestamp: Utc::now(),
            });
        } else {
            self.voice.start_capture()?;
            self.emit(SessionEvent::CaptureStarted {
                session_id: self.id,
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    /// Apply the terminal event of a voice capture session.
    ///
    /// A finalized transcript lands in the input buffer; it is never
    /// auto-sent. Events arriving after the session already ended (for
    /// example the platform's end callback after a manual stop) are
    /// ignored.
    pub fn capture_finished(&self, outcome: CaptureOutcome) {
        if !self.voice.is_recording() {
            return;
        }
        let transcript = self.voice.finish(&outcome);
        if let Some(text) = transcript {
            let mut state = self.state.lock().expect("state mutex poisoned");
            state.input = text;
        }
        self.emit(SessionEvent::CaptureEnded {
            session_id: self.id,
            reason: outcome.end_reason(),
            timestamp: Utc::now(),
        });
    }

    /// Ask the host to hide the widget. Persisted history is untouched;
    /// clearing it is the unload hook's job.
    pub fn request_close(&self) {
        tracing::debug!(session_id = %self.id, "Close requested");
        self.emit(SessionEvent::CloseRequested {
            session_id: self.id,
            timestamp: Utc::now(),
        });
    }

    /// Tab-unload hook: drop the persisted history. The in-memory state
    /// is left alone; the page is going away regardless.
    pub fn handle_unload(&self) {
        let state = self.state.lock().expect("state mutex poisoned");
        if let Err(e) = state.history.clear_persisted() {
            tracing::warn!(error = %e, "Failed to clear persisted history on unload");
        }
        drop(state);
        self.emit(SessionEvent::HistoryCleared {
            session_id: self.id,
            timestamp: Utc::now(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        tracing::debug!(event = event.event_name(), "Session event");
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Tests
// =============================================================================
