//! Time-of-day greeting synthesis for fresh sessions.

use chrono::{Local, Timelike};

use parley_core::types::Message;

/// Returns the salutation for a given local hour.
///
/// Before 12:00 is morning, 12:00 to 16:59 is afternoon, 17:00 onward is
/// evening.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning!"
    } else if hour < 17 {
        "Good afternoon!"
    } else {
        "Good evening!"
    }
}

/// Synthesize the greeting message that seeds an empty session.
pub fn greeting_message(assistant_name: &str) -> Message {
    let salutation = greeting_for_hour(Local::now().hour());
    Message::bot(format!(
        "{} I'm {}. How can I help you today?",
        salutation, assistant_name
    ))
}
