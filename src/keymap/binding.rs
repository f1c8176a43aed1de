//! Key strings such as `"ctrl+s"`, `"shift+tab"` or `"j"` and their parsed form.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maps one key combination to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }

    /// Whether this binding fires for the given key press.
    ///
    /// Bindings with unparseable key strings never match.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.key
            .parse::<KeyChord>()
            .map(|chord| chord.matches(code, modifiers))
            .unwrap_or(false)
    }

    /// Short label for footers, e.g. `Ctrl+S`.
    pub fn display(&self) -> String {
        self.key
            .split('+')
            .map(|part| display_part(part.trim()))
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// A parsed key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // Terminals report shifted characters and BackTab with SHIFT set
        let modifiers = match code {
            KeyCode::Char(c) if !c.is_ascii_lowercase() => modifiers.difference(KeyModifiers::SHIFT),
            KeyCode::BackTab => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        self.code == code && self.modifiers == modifiers
    }
}

impl FromStr for KeyChord {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim().to_lowercase();
        if key == "shift+tab" || key == "backtab" {
            return Ok(Self {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::NONE,
            });
        }

        let mut parts: Vec<&str> = key.split('+').map(str::trim).collect();
        let last = parts.pop().ok_or_else(|| "Empty key".to_string())?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(format!("Unknown modifier: {other}")),
            };
        }

        let code = match last {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            f if f.len() > 1 && f.starts_with('f') => {
                let n: u8 = f[1..].parse().map_err(|_| format!("Unknown key: {f}"))?;
                KeyCode::F(n)
            }
            single => {
                let mut chars = single.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("Unknown key: {single}")),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

fn display_part(part: &str) -> String {
    match part.to_lowercase().as_str() {
        "ctrl" | "control" => "Ctrl".to_string(),
        "alt" | "option" => "Alt".to_string(),
        "shift" => "Shift".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "esc" | "escape" => "Esc".to_string(),
        "space" => "Space".to_string(),
        "tab" => "Tab".to_string(),
        "backtab" => "Shift+Tab".to_string(),
        "pageup" | "pgup" => "PgUp".to_string(),
        "pagedown" | "pgdn" => "PgDn".to_string(),
        other if other.chars().count() == 1 => other.to_uppercase(),
        other => other.to_string(),
    }
}
