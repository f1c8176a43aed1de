//! Sign-in screen.
//!
//! Email and password form. Credentials are validated locally before the
//! `POST /sessions` request goes out; a successful response starts the session
//! and replaces the navigation stack with the dashboard.

use crate::api::RequestError;
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::models::SessionResponse;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::LatestRequest;
use crate::styles::theme;
use crate::ui::Route;
use crate::utils::profile_validation::{validate_sign_in, FIELD_EMAIL, FIELD_PASSWORD};
use crate::utils::{centered_column, create_standard_layout, Form, FormField};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{info, warn};

pub const AUTH_ERROR_TITLE: &str = "Authentication error";
const AUTH_ERROR_MESSAGE: &str = "Could not sign in. Check your credentials and try again.";

pub struct SignInScreen {
    form: Form,
    request: LatestRequest<Result<SessionResponse, RequestError>>,
}

impl SignInScreen {
    /// A prefilled email moves focus straight to the password.
    pub fn new(last_email: Option<&str>) -> Self {
        let email = last_email.unwrap_or_default();
        let mut form = Form::new(vec![
            FormField::new(FIELD_EMAIL, "Email")
                .with_placeholder("you@example.com")
                .with_value(email),
            FormField::new(FIELD_PASSWORD, "Password").secret(),
        ]);
        if !email.is_empty() {
            form.focus(1);
        }
        Self {
            form,
            request: LatestRequest::new("sign-in"),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.request.is_pending()
    }

    fn submit(&mut self, ctx: &ScreenContext) {
        if self.request.is_pending() {
            return;
        }
        let email = self.form.value(FIELD_EMAIL).trim().to_string();
        let password = self.form.value(FIELD_PASSWORD);

        if let Err(errors) = validate_sign_in(&email, &password) {
            self.form.apply_errors(&errors);
            return;
        }
        self.form.clear_errors();

        let api = ctx.api.without_token();
        self.request.start(ctx.runtime, async move { api.sign_in(&email, &password).await });
    }

    /// Map the sign-in response to the actions the app should apply.
    pub fn handle_result(&mut self, result: Result<SessionResponse, RequestError>) -> ScreenAction {
        match result {
            Ok(response) => {
                info!("Signed in as {}", response.user.email);
                if let Some(field) = self.form.field_mut(FIELD_PASSWORD) {
                    field.input.clear();
                }
                ScreenAction::Batch(vec![
                    ScreenAction::SignedIn(response.into()),
                    ScreenAction::ResetTo(Route::Dashboard),
                ])
            }
            Err(e) => {
                warn!("Sign-in failed: {}", e);
                ScreenAction::alert(AUTH_ERROR_TITLE, AUTH_ERROR_MESSAGE)
            }
        }
    }
}

impl Screen for SignInScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, Header::HEIGHT, Footer::HEIGHT);
        Header::render(frame, header, "Sign in", None);

        let column = centered_column(body, 50);
        let [_, email, password, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .areas(column);

        if let Some(field) = self.form.field(FIELD_EMAIL) {
            field.render(frame, email);
        }
        if let Some(field) = self.form.field(FIELD_PASSWORD) {
            field.render(frame, password);
        }

        let status_line = if self.request.is_pending() {
            Line::styled("Signing in...", t.muted_style())
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(status_line).centered(), status);

        let hints = ctx
            .config
            .keymap
            .hints(&[Action::NextField, Action::Confirm, Action::Cancel]);
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

        match ctx.config.keymap.form_action(&key) {
            Some(Action::NextField) => self.form.next_field(),
            Some(Action::PrevField) => self.form.prev_field(),
            Some(Action::Cancel | Action::Quit) => return Ok(ScreenAction::Quit),
            Some(Action::Submit) => self.submit(ctx),
            Some(Action::Confirm) => {
                if self.form.is_last_focused() {
                    self.submit(ctx);
                } else {
                    self.form.next_field();
                }
            }
            _ => {
                self.form.handle_key(key.code);
            }
        }
        Ok(ScreenAction::None)
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(match self.request.poll() {
            Some(result) => self.handle_result(result),
            None => ScreenAction::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::session::Session;
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
    fn test_prefilled_email_focuses_password() {
        let screen = SignInScreen::new(Some("ana@example.com"));
        assert_eq!(screen.form.focused_index, 1);
        assert_eq!(screen.form.value(FIELD_EMAIL), "ana@example.com");

        let empty = SignInScreen::new(None);
        assert_eq!(empty.form.focused_index, 0);
    }

    #[test]
    fn test_success_starts_session_and_resets_to_dashboard() {
        let mut screen = SignInScreen::new(None);
        let action = screen.handle_result(Ok(SessionResponse {
            user: user(),
            token: "tok".to_string(),
        }));
        match action {
            ScreenAction::Batch(actions) => {
                assert!(matches!(
                    &actions[0],
                    ScreenAction::SignedIn(session) if *session == Session::new(user(), "tok")
                ));
                assert!(matches!(&actions[1], ScreenAction::ResetTo(Route::Dashboard)));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_failure_shows_authentication_alert() {
        let mut screen = SignInScreen::new(None);
        let action = screen.handle_result(Err(RequestError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "Incorrect email/password combination.".to_string(),
        }));
        assert!(matches!(
            action,
            ScreenAction::ShowAlert { ref title, .. } if title == AUTH_ERROR_TITLE
        ));
    }
}
