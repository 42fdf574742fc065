//! Input mode state machine
//!
//! Decides whether plain keys are text or shortcuts.

/// Input mode state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation mode - `q` quits, keys go to the focused panel
    #[default]
    Normal,

    /// Text insertion mode - typing goes to the draft
    Insert,
}

impl InputMode {
    /// Returns true if the current mode allows for text editing
    pub fn is_editing(&self) -> bool {
        matches!(self, InputMode::Insert)
    }

    pub fn to_normal(&mut self) {
        *self = InputMode::Normal;
    }

    pub fn to_insert(&mut self) {
        *self = InputMode::Insert;
    }

    /// Label shown in the status bar
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Normal => "NORMAL",
            InputMode::Insert => "INSERT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(InputMode::default(), InputMode::Normal);
    }

    #[test]
    fn test_transitions() {
        let mut mode = InputMode::Normal;
        assert!(!mode.is_editing());

        mode.to_insert();
        assert!(mode.is_editing());
        assert_eq!(mode.label(), "INSERT");

        mode.to_normal();
        assert_eq!(mode, InputMode::Normal);
    }
}
