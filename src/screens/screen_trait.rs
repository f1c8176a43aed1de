//! Screen trait and associated types.
//!
//! Screens own their state, read shared resources through a context and
//! signal navigation or session changes by returning a [`ScreenAction`].
//! Only the app mutates the auth context or the navigation stack.

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::User;
use crate::session::{AuthContext, Session};
use crate::ui::Route;
use crate::widgets::ToastVariant;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::runtime::Handle;

/// Read-only resources for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    pub auth: &'a AuthContext,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, auth: &'a AuthContext) -> Self {
        Self { config, auth }
    }
}

/// Resources for handling events and ticks.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    /// Client carrying the current session's token, if any
    pub api: &'a ApiClient,
    /// Runtime that background requests are spawned on
    pub runtime: &'a Handle,
    pub auth: &'a AuthContext,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, api: &'a ApiClient, runtime: &'a Handle, auth: &'a AuthContext) -> Self {
        Self {
            config,
            api,
            runtime,
            auth,
        }
    }
}

/// What should happen after a screen handled an event.
#[derive(Debug, Clone, Default)]
pub enum ScreenAction {
    #[default]
    None,
    /// Push a screen on the navigation stack.
    Navigate(Route),
    /// Pop the current screen.
    GoBack,
    /// Replace the whole stack with one screen.
    ResetTo(Route),
    /// Open the modal alert.
    ShowAlert { title: String, message: String },
    ShowToast { message: String, variant: ToastVariant },
    SignedIn(Session),
    SignOut,
    /// Replace the signed-in user after a profile or avatar update.
    UpdateUser(User),
    Quit,
    /// Apply several actions in order.
    Batch(Vec<ScreenAction>),
}

impl ScreenAction {
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ShowAlert {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ScreenAction::None)
    }
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::GoBack)
///     }
/// }
/// ```
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Called on every loop iteration to apply finished background requests.
    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// Called when the screen becomes the top of the stack, including when a
    /// screen above it is popped.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
