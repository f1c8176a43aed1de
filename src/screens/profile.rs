//! Profile screen: edit name, email and password, or upload a new avatar.
//!
//! The form is validated locally first; field errors are shown under the
//! inputs and nothing is sent. A valid form results in exactly one
//! `PUT /profile`. Password fields only go out when the current password was
//! typed.

use crate::api::RequestError;
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::models::User;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::LatestRequest;
use crate::styles::theme;
use crate::utils::profile_validation::{
    validate_profile, ProfileFormData, FIELD_EMAIL, FIELD_NAME, FIELD_OLD_PASSWORD, FIELD_PASSWORD,
    FIELD_PASSWORD_CONFIRMATION,
};
use crate::utils::{center_popup, centered_column, create_standard_layout, expand_path, Form, FormField, TextInput};
use crate::widgets::ToastVariant;
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use tracing::{info, warn};

pub const PROFILE_ERROR_TITLE: &str = "Error updating profile";
const PROFILE_ERROR_MESSAGE: &str = "An error occurred while updating your profile. Please try again.";
pub const AVATAR_ERROR_TITLE: &str = "Error updating avatar";
const AVATAR_ERROR_MESSAGE: &str = "The image could not be uploaded. Check the file and try again.";
pub const PROFILE_UPDATED: &str = "Profile updated";
pub const AVATAR_UPDATED: &str = "Avatar updated";

pub struct ProfileScreen {
    user_id: String,
    avatar_url: Option<String>,
    form: Form,
    /// Open while the user types an image path
    avatar_prompt: Option<TextInput>,
    profile_request: LatestRequest<Result<User, RequestError>>,
    avatar_request: LatestRequest<Result<User, RequestError>>,
}

impl ProfileScreen {
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            avatar_url: user.avatar_url.clone(),
            form: Form::new(vec![
                FormField::new(FIELD_NAME, "Name").with_value(&user.name),
                FormField::new(FIELD_EMAIL, "Email").with_value(&user.email),
                FormField::new(FIELD_OLD_PASSWORD, "Current password").secret(),
                FormField::new(FIELD_PASSWORD, "New password").secret(),
                FormField::new(FIELD_PASSWORD_CONFIRMATION, "Confirm password").secret(),
            ]),
            avatar_prompt: None,
            profile_request: LatestRequest::new("update-profile"),
            avatar_request: LatestRequest::new("update-avatar"),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn is_saving(&self) -> bool {
        self.profile_request.is_pending()
    }

    pub fn is_uploading_avatar(&self) -> bool {
        self.avatar_request.is_pending()
    }

    pub fn is_avatar_prompt_open(&self) -> bool {
        self.avatar_prompt.is_some()
    }

    pub fn form_data(&self) -> ProfileFormData {
        ProfileFormData {
            name: self.form.value(FIELD_NAME),
            email: self.form.value(FIELD_EMAIL),
            old_password: self.form.value(FIELD_OLD_PASSWORD),
            password: self.form.value(FIELD_PASSWORD),
            password_confirmation: self.form.value(FIELD_PASSWORD_CONFIRMATION),
        }
    }

    /// Validate and send the profile update. Ignored while one is in flight.
    pub fn submit(&mut self, ctx: &ScreenContext) {
        if self.profile_request.is_pending() {
            return;
        }
        let update = match validate_profile(&self.form_data()) {
            Ok(update) => update,
            Err(errors) => {
                info!("Profile form has {} invalid field(s)", errors.len());
                self.form.apply_errors(&errors);
                return;
            }
        };
        self.form.clear_errors();

        let api = ctx.api.clone();
        self.profile_request
            .start(ctx.runtime, async move { api.update_profile(&update).await });
    }

    fn submit_avatar(&mut self, ctx: &ScreenContext) {
        let Some(prompt) = self.avatar_prompt.take() else {
            return;
        };
        if prompt.is_empty() {
            return;
        }
        let path = expand_path(prompt.text());
        let api = ctx.api.clone();
        let user_id = self.user_id.clone();
        self.avatar_request
            .start(ctx.runtime, async move { api.update_avatar(&user_id, &path).await });
    }

    pub fn handle_profile_result(&mut self, result: Result<User, RequestError>) -> ScreenAction {
        match result {
            Ok(user) => {
                info!("Profile updated for user {}", user.id);
                ScreenAction::Batch(vec![
                    ScreenAction::UpdateUser(user),
                    ScreenAction::ShowToast {
                        message: PROFILE_UPDATED.to_string(),
                        variant: ToastVariant::Success,
                    },
                    ScreenAction::GoBack,
                ])
            }
            Err(e) => {
                warn!("Failed to update profile: {}", e);
                ScreenAction::alert(PROFILE_ERROR_TITLE, PROFILE_ERROR_MESSAGE)
            }
        }
    }

    pub fn handle_avatar_result(&mut self, result: Result<User, RequestError>) -> ScreenAction {
        match result {
            Ok(user) => {
                info!("Avatar updated for user {}", user.id);
                self.avatar_url = user.avatar_url.clone();
                ScreenAction::Batch(vec![
                    ScreenAction::UpdateUser(user),
                    ScreenAction::ShowToast {
                        message: AVATAR_UPDATED.to_string(),
                        variant: ToastVariant::Success,
                    },
                ])
            }
            Err(e) => {
                warn!("Failed to update avatar: {}", e);
                ScreenAction::alert(AVATAR_ERROR_TITLE, AVATAR_ERROR_MESSAGE)
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent, ctx: &ScreenContext) {
        match ctx.config.keymap.form_action(&key) {
            Some(Action::Confirm | Action::Submit) => self.submit_avatar(ctx),
            Some(Action::Cancel) => self.avatar_prompt = None,
            _ => {
                if let Some(prompt) = self.avatar_prompt.as_mut() {
                    prompt.handle_key(key.code);
                }
            }
        }
    }

    fn render_avatar_line(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let avatar = match &self.avatar_url {
            Some(url) => Span::styled(url.clone(), t.text_style()),
            None => Span::styled("No avatar", t.muted_style()),
        };
        let status = if self.avatar_request.is_pending() {
            "  uploading...".to_string()
        } else {
            format!("  {}: change", ctx.config.keymap.key_for(Action::ChangeAvatar))
        };
        let line = Line::from(vec![
            Span::styled("Avatar: ", t.title_style()),
            avatar,
            Span::styled(status, t.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_avatar_prompt(&self, frame: &mut Frame, area: Rect, prompt: &TextInput) {
        let t = theme();
        let popup = center_popup(area, 60, 3);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(" Path to image ")
            .title_style(t.title_style());
        let width = popup.width.saturating_sub(2) as usize;
        let (visible, cursor) = prompt.visible_window(width, None);
        frame.render_widget(Paragraph::new(visible).style(t.text_style()).block(block), popup);
        frame.set_cursor_position((popup.x + 1 + cursor as u16, popup.y + 1));
    }
}

impl Screen for ProfileScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, Header::HEIGHT, Footer::HEIGHT);
        Header::render(frame, header, "My profile", None);

        let column = centered_column(body, 60);
        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
        for i in 0..self.form.fields.len() {
            if i == 2 {
                constraints.push(Constraint::Length(1));
            }
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(column);

        self.render_avatar_line(frame, rows[0], ctx);
        let mut row = 2;
        for (i, field) in self.form.fields.iter().enumerate() {
            if i == 2 {
                row += 1;
            }
            field.render(frame, rows[row]);
            row += 1;
        }
        if self.profile_request.is_pending() {
            frame.render_widget(Paragraph::new(Line::styled("Saving...", t.muted_style())), rows[row]);
        }

        if let Some(prompt) = &self.avatar_prompt {
            self.render_avatar_prompt(frame, body, prompt);
        }

        let hints = ctx.config.keymap.hints(&[
            Action::NextField,
            Action::Submit,
            Action::ChangeAvatar,
            Action::Cancel,
        ]);
        Footer::render(frame, footer, &hints);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        if self.avatar_prompt.is_some() {
            self.handle_prompt_key(key, ctx);
            return Ok(ScreenAction::None);
        }

        match ctx.config.keymap.form_action(&key) {
            // Leaving would drop a request the server may already have applied
            Some(Action::Cancel) if self.is_saving() || self.is_uploading_avatar() => {}
            Some(Action::Cancel) => return Ok(ScreenAction::GoBack),
            Some(Action::NextField | Action::MoveDown) => self.form.next_field(),
            Some(Action::PrevField | Action::MoveUp) => self.form.prev_field(),
            Some(Action::Submit) => self.submit(ctx),
            Some(Action::Confirm) => {
                if self.form.is_last_focused() {
                    self.submit(ctx);
                } else {
                    self.form.next_field();
                }
            }
            Some(Action::ChangeAvatar) => self.avatar_prompt = Some(TextInput::new()),
            _ => {
                self.form.handle_key(key.code);
            }
        }
        Ok(ScreenAction::None)
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Some(result) = self.avatar_request.poll() {
            let action = self.handle_avatar_result(result);
            if !action.is_none() {
                return Ok(action);
            }
        }
        Ok(match self.profile_request.poll() {
            Some(result) => self.handle_profile_result(result),
            None => ScreenAction::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_form_prefilled_from_user() {
        let screen = ProfileScreen::new(&user());
        let data = screen.form_data();
        assert_eq!(data.name, "Ana");
        assert_eq!(data.email, "ana@example.com");
        assert!(data.old_password.is_empty());
    }

    #[test]
    fn test_success_updates_user_toasts_and_goes_back() {
        let mut screen = ProfileScreen::new(&user());
        let mut updated = user();
        updated.name = "Ana Maria".to_string();

        match screen.handle_profile_result(Ok(updated.clone())) {
            ScreenAction::Batch(actions) => {
                assert!(matches!(&actions[0], ScreenAction::UpdateUser(u) if *u == updated));
                assert!(matches!(
                    &actions[1],
                    ScreenAction::ShowToast { message, .. } if message == PROFILE_UPDATED
                ));
                assert!(matches!(actions[2], ScreenAction::GoBack));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_failures_show_alerts() {
        let mut screen = ProfileScreen::new(&user());
        let err = || RequestError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "Old password does not match.".to_string(),
        };
        assert!(matches!(
            screen.handle_profile_result(Err(err())),
            ScreenAction::ShowAlert { ref title, .. } if title == PROFILE_ERROR_TITLE
        ));
        assert!(matches!(
            screen.handle_avatar_result(Err(err())),
            ScreenAction::ShowAlert { ref title, .. } if title == AVATAR_ERROR_TITLE
        ));
    }

    #[test]
    fn test_avatar_success_updates_shown_avatar() {
        let mut screen = ProfileScreen::new(&user());
        let mut updated = user();
        updated.avatar_url = Some("http://localhost:3333/files/u1.png".to_string());
        let action = screen.handle_avatar_result(Ok(updated));
        assert!(matches!(action, ScreenAction::Batch(_)));
        assert_eq!(
            screen.avatar_url.as_deref(),
            Some("http://localhost:3333/files/u1.png")
        );
    }
}
