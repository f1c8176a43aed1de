//! Semantic actions triggered by key bindings.

use serde::{Deserialize, Serialize};

/// Everything a key press can mean outside of typing into a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToEnd,

    // Selection
    Confirm,
    Cancel,
    Select,

    // Fields and focus areas
    NextField,
    PrevField,

    // Global
    Quit,

    // Screen actions
    Refresh,
    Submit,
    OpenProfile,
    SignOut,
    ToggleDatePicker,
    ChangeAvatar,
}

impl Action {
    /// Human-readable description used in the footer hints.
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::Confirm => "Confirm",
            Action::Cancel => "Back",
            Action::Select => "Select",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Quit => "Quit",
            Action::Refresh => "Refresh",
            Action::Submit => "Submit",
            Action::OpenProfile => "Profile",
            Action::SignOut => "Sign out",
            Action::ToggleDatePicker => "Calendar",
            Action::ChangeAvatar => "Change avatar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde_names() {
        assert_eq!(serde_json::to_string(&Action::ToggleDatePicker).unwrap(), "\"toggle_date_picker\"");
        let action: Action = serde_json::from_str("\"sign_out\"").unwrap();
        assert_eq!(action, Action::SignOut);
    }

    #[test]
    fn test_description() {
        assert_eq!(Action::Cancel.description(), "Back");
        assert_eq!(Action::Submit.description(), "Submit");
    }
}
