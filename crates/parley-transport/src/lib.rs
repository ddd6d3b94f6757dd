//! Parley Transport crate - the remote reply endpoint client.
//!
//! One POST operation: an utterance plus a user id go out, a reply plus
//! optional quick-reply options come back. Any transport-level failure is
//! a single error signal; the session layer substitutes its fallback
//! message and never retries.

pub mod client;
pub mod wire;

pub use client::{HttpReplyClient, ReplyTransport};
pub use wire::{ReplyPayload, ReplyRequest};
