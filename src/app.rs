use crate::api::ApiClient;
use crate::config::Config;
use crate::screens::{
    AppointmentCreatedScreen, CreateAppointmentScreen, DashboardScreen, ProfileScreen, RenderContext, Screen,
    ScreenAction, ScreenContext, SignInScreen,
};
use crate::session::AuthContext;
use crate::tui::Tui;
use crate::ui::Route;
use crate::widgets::{Alert, Dialog, Toast, ToastManager};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// How long the loop waits for input before ticking screens.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const ALERT_FOOTER: &str = "Enter: OK";

/// Main application state
pub struct App {
    config: Config,
    config_path: PathBuf,
    runtime: Runtime,
    /// Client without credentials; session clients are derived from it
    base_api: ApiClient,
    api: ApiClient,
    auth: AuthContext,
    /// Navigation stack, top last
    stack: Vec<(Route, Box<dyn Screen>)>,
    alert: Option<Alert>,
    toasts: ToastManager,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let api_url = config.effective_api_url();
        let base_api = ApiClient::new(&api_url, config.request_timeout())
            .with_context(|| format!("Failed to create API client for {}", api_url))?;
        info!("Using API at {}", base_api.base_url());

        let mut app = Self {
            config,
            config_path,
            runtime,
            api: base_api.clone(),
            base_api,
            auth: AuthContext::new(),
            stack: Vec::new(),
            alert: None,
            toasts: ToastManager::new(),
            should_quit: false,
        };
        app.reset_to(Route::SignIn);
        Ok(app)
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let result = self.event_loop(&mut tui);

        tui.exit()?;
        result
    }

    fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        loop {
            self.draw(tui)?;

            if self.should_quit {
                break;
            }

            self.tick();

            if let Some(event) = tui.poll_event(POLL_INTERVAL)? {
                self.handle_event(event);
            }
        }
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let ctx = RenderContext::new(&self.config, &self.auth);
        let stack = &mut self.stack;
        let alert = &self.alert;
        let toasts = &self.toasts;
        let mut render_result = Ok(());

        tui.terminal_mut().draw(|frame| {
            let area = frame.area();
            if let Some((_, screen)) = stack.last_mut() {
                render_result = screen.render(frame, area, &ctx);
            }
            if let Some(alert) = alert {
                frame.render_widget(Dialog::from_alert(alert).footer(ALERT_FOOTER), area);
            }
            toasts.render(frame, area);
        })?;

        render_result
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.stack.last().map(|(route, _)| route)
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route a terminal event to the alert or the top screen.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                self.should_quit = true;
                return;
            }
            // The alert is modal: only Enter or Esc get through, and they close it
            if self.alert.is_some() {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.alert = None;
                }
                return;
            }
        }

        let ctx = ScreenContext::new(&self.config, &self.api, self.runtime.handle(), &self.auth);
        let action = match self.stack.last_mut() {
            Some((_, screen)) => screen.handle_event(event, &ctx),
            None => Ok(ScreenAction::None),
        };
        match action {
            Ok(action) => self.apply_action(action),
            Err(e) => error!("Error handling event: {:#}", e),
        }
    }

    /// Let the top screen apply finished requests, and expire toasts.
    pub fn tick(&mut self) {
        let ctx = ScreenContext::new(&self.config, &self.api, self.runtime.handle(), &self.auth);
        let action = match self.stack.last_mut() {
            Some((_, screen)) => screen.tick(&ctx),
            None => Ok(ScreenAction::None),
        };
        match action {
            Ok(action) => self.apply_action(action),
            Err(e) => error!("Error ticking screen: {:#}", e),
        }
        self.toasts.tick();
    }

    pub fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(route) => self.push(route),
            ScreenAction::GoBack => self.pop(),
            ScreenAction::ResetTo(route) => self.reset_to(route),
            ScreenAction::ShowAlert { title, message } => {
                debug!("Showing alert: {}", title);
                self.alert = Some(Alert::error(title, message));
            }
            ScreenAction::ShowToast { message, variant } => {
                self.toasts.push(Toast::new(message, variant));
            }
            ScreenAction::SignedIn(session) => {
                self.api = self.base_api.with_token(session.token());
                let email = session.user.email.clone();
                self.auth.sign_in(session);
                self.remember_email(email);
            }
            ScreenAction::SignOut => {
                self.auth.sign_out();
                self.api = self.base_api.without_token();
                self.reset_to(Route::SignIn);
            }
            ScreenAction::UpdateUser(user) => {
                if !self.auth.update_user(user) {
                    warn!("Ignoring user update without a session");
                }
            }
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Batch(actions) => {
                for action in actions {
                    self.apply_action(action);
                }
            }
        }
    }

    fn remember_email(&mut self, email: String) {
        if self.config.last_email.as_deref() == Some(email.as_str()) {
            return;
        }
        self.config.last_email = Some(email);
        if let Err(e) = self.config.save(&self.config_path) {
            warn!("Failed to save config: {:#}", e);
        }
    }

    /// Build the screen for `route`. Protected routes fall back to sign-in
    /// when there is no session.
    fn build_screen(&self, route: Route) -> (Route, Box<dyn Screen>) {
        if route.requires_session() && !self.auth.is_signed_in() {
            warn!("No session for {}, showing sign-in", route.name());
            return self.build_screen(Route::SignIn);
        }
        let screen: Box<dyn Screen> = match &route {
            Route::SignIn => Box::new(SignInScreen::new(self.config.last_email.as_deref())),
            Route::Dashboard => Box::new(DashboardScreen::new()),
            Route::CreateAppointment { provider_id } => {
                let today = chrono::Local::now().date_naive();
                Box::new(CreateAppointmentScreen::new(provider_id.clone(), today))
            }
            Route::AppointmentCreated { date, provider_name } => {
                Box::new(AppointmentCreatedScreen::new(*date, provider_name.clone()))
            }
            Route::Profile => match self.auth.user() {
                Some(user) => Box::new(ProfileScreen::new(user)),
                None => return self.build_screen(Route::SignIn),
            },
        };
        (route, screen)
    }

    fn push(&mut self, route: Route) {
        info!("Navigating to {}", route.name());
        let entry = self.build_screen(route);
        self.stack.push(entry);
        self.enter_top();
    }

    fn pop(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        self.stack.pop();
        if let Some(route) = self.current_route() {
            info!("Back to {}", route.name());
        }
        self.enter_top();
    }

    fn reset_to(&mut self, route: Route) {
        info!("Resetting navigation to {}", route.name());
        self.stack.clear();
        let entry = self.build_screen(route);
        self.stack.push(entry);
        self.enter_top();
    }

    fn enter_top(&mut self) {
        let ctx = ScreenContext::new(&self.config, &self.api, self.runtime.handle(), &self.auth);
        if let Some((route, screen)) = self.stack.last_mut() {
            if let Err(e) = screen.on_enter(&ctx) {
                error!("Failed to enter {}: {:#}", route.name(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::session::Session;
    use crossterm::event::KeyEvent;
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            avatar_url: None,
        }
    }

    fn app(dir: &TempDir) -> App {
        let mut config = Config::default();
        // Nothing listens here; background fetches fail quietly
        config.api_url = "http://127.0.0.1:9".to_string();
        App::new(config, dir.path().join("config.toml")).unwrap()
    }

    fn signed_in(dir: &TempDir) -> App {
        let mut app = app(dir);
        app.apply_action(ScreenAction::Batch(vec![
            ScreenAction::SignedIn(Session::new(user(), "tok")),
            ScreenAction::ResetTo(Route::Dashboard),
        ]));
        app
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_starts_on_sign_in() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        assert_eq!(app.current_route(), Some(&Route::SignIn));
        assert!(!app.api().is_authenticated());
    }

    #[test]
    fn test_sign_in_authenticates_and_remembers_email() {
        let dir = TempDir::new().unwrap();
        let app = signed_in(&dir);
        assert_eq!(app.current_route(), Some(&Route::Dashboard));
        assert_eq!(app.stack_depth(), 1);
        assert!(app.api().is_authenticated());
        assert_eq!(app.auth().user().map(|u| u.name.as_str()), Some("Ana"));

        let saved = Config::load_or_create(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.last_email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_protected_route_without_session_shows_sign_in() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.apply_action(ScreenAction::Navigate(Route::Profile));
        assert_eq!(app.current_route(), Some(&Route::SignIn));
    }

    #[test]
    fn test_navigation_stack() {
        let dir = TempDir::new().unwrap();
        let mut app = signed_in(&dir);
        app.apply_action(ScreenAction::Navigate(Route::Profile));
        assert_eq!(app.stack_depth(), 2);
        app.apply_action(ScreenAction::GoBack);
        assert_eq!(app.current_route(), Some(&Route::Dashboard));
        // The root is never popped
        app.apply_action(ScreenAction::GoBack);
        assert_eq!(app.stack_depth(), 1);
    }

    #[test]
    fn test_update_user_and_sign_out() {
        let dir = TempDir::new().unwrap();
        let mut app = signed_in(&dir);
        let mut renamed = user();
        renamed.name = "Ana Maria".to_string();
        app.apply_action(ScreenAction::UpdateUser(renamed));
        assert_eq!(app.auth().user().map(|u| u.name.as_str()), Some("Ana Maria"));

        app.apply_action(ScreenAction::SignOut);
        assert!(!app.auth().is_signed_in());
        assert!(!app.api().is_authenticated());
        assert_eq!(app.current_route(), Some(&Route::SignIn));
    }

    #[test]
    fn test_alert_is_modal_until_dismissed() {
        let dir = TempDir::new().unwrap();
        let mut app = signed_in(&dir);
        app.apply_action(ScreenAction::alert("Error creating appointment", "Try again"));

        // 'q' would quit from the dashboard, but the alert swallows it
        app.handle_event(press(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert!(app.alert().is_some());

        app.handle_event(press(KeyCode::Enter));
        assert!(app.alert().is_none());

        app.handle_event(press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit());
    }
}
