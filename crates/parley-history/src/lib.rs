//! Parley History crate - tab-scoped message persistence.
//!
//! Provides the injected storage capability (`HistoryStore`) with memory
//! and file backends, time-of-day greeting synthesis, and the append-only
//! `HistoryLog` that owns the message sequence for one session.

pub mod greeting;
pub mod log;
pub mod store;

pub use greeting::{greeting_for_hour, greeting_message};
pub use log::HistoryLog;
pub use store::{FileStore, HistoryStore, MemoryStore};
