//! Parley Core crate - shared types, configuration, errors, and events.
//!
//! Everything the widget session crates have in common lives here: the
//! message and quick-option data model, the TOML configuration layer,
//! the top-level error enum, and the host-facing session events.

pub mod config;
pub mod error;
pub mod events;
pub mod telemetry;
pub mod types;

pub use config::ParleyConfig;
pub use error::{ParleyError, Result};
pub use events::SessionEvent;
pub use types::*;
