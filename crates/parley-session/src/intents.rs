//! Pure translation of raw host input into session intents.
//!
//! Enter without a modifier means submit; a pointer press outside the
//! widget bounds means close. Neither carries any state of its own.

/// An intent derived from raw host input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiIntent {
    /// Submit the current input buffer.
    Submit,
    /// Ask the host to hide the widget.
    RequestClose,
}

/// Widget placement in host coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WidgetBounds {
    /// Whether a point falls inside the widget.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Translate a key press from the input field.
///
/// Enter submits unless shift is held (shift-enter stays a literal
/// newline for the host to insert).
pub fn intent_for_key(key: &str, shift_held: bool) -> Option<UiIntent> {
    if key == "Enter" && !shift_held {
        Some(UiIntent::Submit)
    } else {
        None
    }
}

/// Translate a pointer press anywhere on the page.
///
/// A press outside the widget bounds closes it; presses inside are the
/// host's own business.
pub fn intent_for_pointer_down(px: f64, py: f64, bounds: &WidgetBounds) -> Option<UiIntent> {
    if bounds.contains(px, py) {
        None
    } else {
        Some(UiIntent::RequestClose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: WidgetBounds = WidgetBounds {
        x: 100.0,
        y: 50.0,
        width: 300.0,
        height: 400.0,
    };

    #[test]
    fn test_enter_submits() {
        assert_eq!(intent_for_key("Enter", false), Some(UiIntent::Submit));
    }

    #[test]
    fn test_shift_enter_does_not_submit() {
        assert_eq!(intent_for_key("Enter", true), None);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert_eq!(intent_for_key("a", false), None);
        assert_eq!(intent_for_key("Escape", false), None);
        assert_eq!(intent_for_key("Tab", true), None);
    }

    #[test]
    fn test_click_inside_is_ignored() {
        assert_eq!(intent_for_pointer_down(150.0, 100.0, &BOUNDS), None);
    }

    #[test]
    fn test_click_outside_closes() {
        assert_eq!(
            intent_for_pointer_down(10.0, 10.0, &BOUNDS),
            Some(UiIntent::RequestClose)
        );
        assert_eq!(
            intent_for_pointer_down(500.0, 500.0, &BOUNDS),
            Some(UiIntent::RequestClose)
        );
    }

    #[test]
    fn test_bounds_edges() {
        // Top-left corner is inside, bottom-right edge is outside.
        assert!(BOUNDS.contains(100.0, 50.0));
        assert!(!BOUNDS.contains(400.0, 450.0));
        assert_eq!(intent_for_pointer_down(100.0, 50.0, &BOUNDS), None);
        assert_eq!(
            intent_for_pointer_down(400.0, 450.0, &BOUNDS),
            Some(UiIntent::RequestClose)
        );
    }
}
