//! Keymap configuration.
//!
//! A preset provides the base bindings; user overrides from the config file
//! are checked first and shadow every preset binding for the same action.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{KeyBinding, KeyChord};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Overrides first, then preset bindings whose action is not overridden.
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|b| !self.overrides.iter().any(|o| o.action == b.action)),
        );
        bindings
    }

    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|b| b.matches(code, modifiers))
            .map(|b| b.action)
    }

    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.get_action(key.code, key.modifiers)
    }

    /// Action for a key press while a text field has focus.
    ///
    /// Plain characters belong to the field, so only bindings on non-character
    /// keys or with Ctrl/Alt are honoured.
    pub fn form_action(&self, key: &KeyEvent) -> Option<Action> {
        let is_text = matches!(key.code, KeyCode::Char(_))
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if is_text {
            None
        } else {
            self.action_for(key)
        }
    }

    /// Display string of the first key bound to `action`.
    pub fn key_for(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Footer hint text like `Enter: Confirm | Esc: Back`.
    pub fn hints(&self, actions: &[Action]) -> String {
        actions
            .iter()
            .map(|a| format!("{}: {}", self.key_for(*a), a.description()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
