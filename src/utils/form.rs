//! Form field and form handling utilities.
//!
//! Shared by the sign-in and profile screens. Each field carries a key that
//! matches the field names used by [`ValidationErrors`], so validation results
//! map straight back onto the inputs.

use crate::styles::theme;
use crate::utils::profile_validation::ValidationErrors;
use crate::utils::text_input::TextInput;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SECRET_MASK: char = '•';

/// A single labelled text input.
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: String,
    pub input: TextInput,
    pub placeholder: Option<String>,
    /// Masks the value when rendering
    pub secret: bool,
    pub is_focused: bool,
    error: Option<String>,
}

impl FormField {
    pub fn new(key: &'static str, label: &str) -> Self {
        Self {
            key,
            label: label.to_string(),
            input: TextInput::new(),
            placeholder: None,
            secret: false,
            is_focused: false,
            error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.input = TextInput::with_text(value);
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn value(&self) -> &str {
        self.input.text()
    }

    pub fn set_value(&mut self, value: &str) {
        self.input.set_text(value);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Editing keys go to the input; typing clears a stale error.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let handled = self.input.handle_key(key);
        if handled && matches!(key, KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete) {
            self.error = None;
        }
        handled
    }

    /// Render as a bordered box, 3 rows high, with any error in the bottom border.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let border_style = if self.error.is_some() {
            t.error_style()
        } else if self.is_focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.label));
        if let Some(error) = &self.error {
            block = block.title_bottom(Line::from(Span::styled(format!(" {} ", error), t.error_style())));
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let mask = self.secret.then_some(SECRET_MASK);
        let (visible, cursor_offset) = self.input.visible_window(inner_width, mask);

        let paragraph = if self.input.text().is_empty() {
            let placeholder = self.placeholder.clone().unwrap_or_default();
            Paragraph::new(Span::styled(placeholder, t.muted_style()))
        } else {
            Paragraph::new(Span::styled(visible, t.text_style()))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.is_focused && area.width > 2 && area.height > 2 {
            let cursor_x = area.x + 1 + cursor_offset as u16;
            if cursor_x < area.x + area.width - 1 {
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
        }
    }
}

/// An ordered set of fields with one focused at a time.
#[derive(Debug, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused_index: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            focused_index: 0,
        };
        form.focus(0);
        form
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    /// Value of the field with `key`, empty when there is no such field.
    pub fn value(&self, key: &str) -> String {
        self.field(key).map(|f| f.value().to_string()).unwrap_or_default()
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused_index)
    }

    pub fn is_last_focused(&self) -> bool {
        self.focused_index + 1 == self.fields.len()
    }

    pub fn focus(&mut self, index: usize) {
        if index >= self.fields.len() {
            return;
        }
        self.focused_index = index;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.is_focused = i == index;
        }
    }

    /// Move focus to the next field, wrapping.
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus((self.focused_index + 1) % self.fields.len());
        }
    }

    /// Move focus to the previous field, wrapping.
    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            let len = self.fields.len();
            self.focus((self.focused_index + len - 1) % len);
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        self.focused_field_mut()
            .map(|field| field.handle_key(key))
            .unwrap_or(false)
    }

    /// Replace all field errors with `errors` and focus the first invalid field.
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        let mut first_invalid = None;
        for (i, field) in self.fields.iter_mut().enumerate() {
            let error = errors.get(field.key).map(str::to_string);
            if error.is_some() && first_invalid.is_none() {
                first_invalid = Some(i);
            }
            field.set_error(error);
        }
        if let Some(i) = first_invalid {
            self.focus(i);
        }
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.set_error(None);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error().is_some())
    }
}
