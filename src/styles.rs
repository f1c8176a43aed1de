//! Theme and style system.
//!
//! The dark theme follows the booking app's brand: orange accent on a dark
//! background with warm off-white text.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::RwLock;

/// List selection indicator shown next to the selected item
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

const ORANGE: Color = Color::Rgb(255, 144, 0);
const OFF_WHITE: Color = Color::Rgb(244, 237, 232);
const GREY: Color = Color::Rgb(153, 149, 145);
const SURFACE: Color = Color::Rgb(62, 59, 71);

/// Global theme instance (supports runtime updates)
static THEME: RwLock<Theme> = RwLock::new(Theme {
    theme_type: ThemeType::Dark,
    primary: ORANGE,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Rgb(194, 62, 62),
    text: OFF_WHITE,
    text_muted: GREY,
    border: GREY,
    border_focused: ORANGE,
    highlight_bg: SURFACE,
    background: Color::Reset,
});

/// Initialize the global theme (call once at startup)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(|e| e.into_inner());
    *theme = Theme::new(theme_type);
}

/// Get the current theme
pub fn theme() -> Theme {
    THEME.read().unwrap_or_else(|e| e.into_inner()).clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Disable all UI colors (`NO_COLOR=1`)
    #[serde(alias = "no-color", alias = "no_color")]
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

/// Color palette for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Accent for titles, focused borders and the selected hour
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub text: Color,
    /// Secondary text and unavailable hours
    pub text_muted: Color,

    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
    /// Use Reset for the terminal default
    pub background: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: ORANGE,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Rgb(194, 62, 62),
            text: OFF_WHITE,
            text_muted: GREY,
            border: GREY,
            border_focused: ORANGE,
            highlight_bg: SURFACE,
            background: Color::Reset,
        }
    }

    pub fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Rgb(204, 102, 0),
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            text: Color::Black,
            text_muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Rgb(204, 102, 0),
            highlight_bg: Color::Gray,
            background: Color::Reset,
        }
    }

    /// Style helpers below avoid setting fg/bg in this mode.
    pub fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            highlight_bg: Color::Reset,
            background: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    pub fn title_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::DIM);
        }
        Style::default().fg(self.text_muted)
    }

    pub fn success_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.warning)
    }

    /// Inline field errors
    pub fn error_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.error)
    }

    pub fn border_focused_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.border_focused)
    }

    pub fn border_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.border)
    }

    /// Style for list item highlight (selected row)
    pub fn highlight_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.primary)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// The chosen hour or date: accent background.
    pub fn selected_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::REVERSED);
        }
        Style::default()
            .fg(Color::Rgb(35, 33, 41))
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Hours reported as unavailable
    pub fn disabled_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
        }
        Style::default().fg(self.text_muted).add_modifier(Modifier::DIM)
    }

    pub fn background_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().bg(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_from_str() {
        assert_eq!("dark".parse::<ThemeType>().unwrap(), ThemeType::Dark);
        assert_eq!("light".parse::<ThemeType>().unwrap(), ThemeType::Light);
        assert_eq!("no-color".parse::<ThemeType>().unwrap(), ThemeType::NoColor);
        assert_eq!("whatever".parse::<ThemeType>().unwrap(), ThemeType::Dark);
    }

    #[test]
    fn test_theme_type_serde() {
        let t: ThemeType = serde_json::from_str("\"nocolor\"").unwrap();
        assert_eq!(t, ThemeType::NoColor);
        let t: ThemeType = serde_json::from_str("\"no_color\"").unwrap();
        assert_eq!(t, ThemeType::NoColor);
        assert_eq!(serde_json::to_string(&ThemeType::Light).unwrap(), "\"light\"");
    }

    #[test]
    fn test_no_color_theme_styles_do_not_set_colors() {
        let t = Theme::new(ThemeType::NoColor);
        for s in [t.highlight_style(), t.selected_style(), t.error_style()] {
            assert!(s.fg.is_none());
            assert!(s.bg.is_none());
        }
    }

    #[test]
    fn test_dark_theme_uses_brand_accent() {
        assert_eq!(Theme::dark().primary, Color::Rgb(255, 144, 0));
    }
}
