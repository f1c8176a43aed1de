//! Built-in keymaps.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc
    #[default]
    Standard,
    /// hjkl on top of the standard keys
    Vim,
}

impl KeymapPreset {
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Vim => {
                let mut bindings = vec![
                    KeyBinding::new("k", Action::MoveUp),
                    KeyBinding::new("j", Action::MoveDown),
                    KeyBinding::new("h", Action::MoveLeft),
                    KeyBinding::new("l", Action::MoveRight),
                    KeyBinding::new("ctrl+u", Action::PageUp),
                    KeyBinding::new("ctrl+d", Action::PageDown),
                    KeyBinding::new("g", Action::GoToTop),
                ];
                bindings.extend(standard_bindings());
                bindings
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
        }
    }
}

fn standard_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("pageup", Action::PageUp),
        KeyBinding::new("pagedown", Action::PageDown),
        KeyBinding::new("home", Action::GoToTop),
        KeyBinding::new("end", Action::GoToEnd),
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("space", Action::Select),
        KeyBinding::new("tab", Action::NextField),
        KeyBinding::new("shift+tab", Action::PrevField),
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("r", Action::Refresh),
        KeyBinding::new("ctrl+s", Action::Submit),
        KeyBinding::new("p", Action::OpenProfile),
        KeyBinding::new("o", Action::SignOut),
        KeyBinding::new("d", Action::ToggleDatePicker),
        KeyBinding::new("ctrl+a", Action::ChangeAvatar),
    ]
}
