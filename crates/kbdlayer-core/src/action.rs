use std::fmt;

/// Represents the action state of a key event.
///
/// Hosts deliver `keydown` for both the initial press and auto-repeat;
/// only `keyup` is a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    Release,
    #[default]
    Press,
    Repeat,
}

impl Action {
    /// Returns true if the action is either PRESS or REPEAT
    pub fn is_pressed(self) -> bool {
        matches!(self, Action::Press | Action::Repeat)
    }

    /// Returns true if this is a RELEASE event
    pub fn is_released(self) -> bool {
        matches!(self, Action::Release)
    }

    /// Create Action from a DOM-style event type (`keydown` / `keyup`)
    pub fn from_event_type(event_type: &str, repeat: bool) -> Option<Self> {
        match event_type {
            "keydown" if repeat => Some(Action::Repeat),
            "keydown" => Some(Action::Press),
            "keyup" => Some(Action::Release),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Release => write!(f, "release"),
            Action::Press => write!(f, "press"),
            Action::Repeat => write!(f, "repeat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_properties() {
        assert!(Action::Press.is_pressed());
        assert!(!Action::Press.is_released());

        assert!(Action::Repeat.is_pressed());
        assert!(!Action::Repeat.is_released());

        assert!(!Action::Release.is_pressed());
        assert!(Action::Release.is_released());
    }

    #[test]
    fn test_action_from_event_type() {
        assert_eq!(Action::from_event_type("keydown", false), Some(Action::Press));
        assert_eq!(Action::from_event_type("keydown", true), Some(Action::Repeat));
        assert_eq!(Action::from_event_type("keyup", false), Some(Action::Release));
        assert_eq!(Action::from_event_type("keypress", false), None);
    }
}
