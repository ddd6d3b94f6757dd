//! Append-only history log backed by an injected store.

use std::sync::Arc;

use parley_core::error::Result;
use parley_core::types::Message;

use crate::greeting::greeting_message;
use crate::store::HistoryStore;

/// Ordered log of exchanged messages for one session.
///
/// Owns the in-memory sequence and keeps the injected store in sync by
/// re-persisting the whole serialized sequence on every append. Messages
/// are never edited, removed individually, or reordered.
pub struct HistoryLog {
    store: Arc<dyn HistoryStore>,
    messages: Vec<Message>,
    seeded: bool,
}

impl HistoryLog {
    /// Load persisted history from the store, or seed a fresh session.
    ///
    /// Absent or malformed stored history falls back to a synthesized
    /// time-of-day greeting, which is immediately persisted so a reload
    /// within the same tab restores it. Corruption is never surfaced to
    /// the user.
    pub fn open(store: Arc<dyn HistoryStore>, assistant_name: &str) -> Self {
        let restored = match store.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Message>>(&raw) {
                Ok(messages) if !messages.is_empty() => Some(messages),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed persisted history");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted history");
                None
            }
        };

        match restored {
            Some(messages) => {
                tracing::debug!(count = messages.len(), "Restored persisted history");
                Self {
                    store,
                    messages,
                    seeded: false,
                }
            }
            None => {
                let greeting = greeting_message(assistant_name);
                let log = Self {
                    store,
                    messages: vec![greeting],
                    seeded: true,
                };
                if let Err(e) = log.persist() {
                    tracing::warn!(error = %e, "Failed to persist seeded greeting");
                }
                log
            }
        }
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True if this load seeded a fresh greeting instead of restoring.
    pub fn started_fresh(&self) -> bool {
        self.seeded
    }

    /// Append a message and re-persist the full sequence.
    ///
    /// The in-memory append always happens; a persistence failure is
    /// returned for the caller to log and carry on.
    pub fn append(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        self.persist()
    }

    /// Remove the persisted history only. The in-memory sequence stays
    /// untouched; this is the tab-unload hook.
    pub fn clear_persisted(&self) -> Result<()> {
        self.store.clear()
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.messages)?;
        self.store.write(&raw)
    }
}

// =============================================================================
// Tests
// =============================================================================
