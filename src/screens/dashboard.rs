//! Dashboard: greeting and the list of hairdressers.

use crate::api::RequestError;
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::models::Provider;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::LatestRequest;
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Route;
use crate::utils::{create_standard_layout, ListStateExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use tracing::warn;

pub const PROVIDERS_TITLE: &str = "Hairdressers";
pub const PROVIDERS_LOAD_ERROR: &str = "Could not load providers";
const WORKING_DAYS: &str = "Monday to Friday";
const WORKING_HOURS: &str = "8h to 18h";

pub struct DashboardScreen {
    providers: Vec<Provider>,
    list_state: ListState,
    request: LatestRequest<Result<Vec<Provider>, RequestError>>,
    load_error: Option<String>,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            list_state: ListState::default(),
            request: LatestRequest::new("providers"),
            load_error: None,
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn selected_provider(&self) -> Option<&Provider> {
        self.list_state.selected().and_then(|i| self.providers.get(i))
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        self.request.start(ctx.runtime, async move { api.providers().await });
    }

    /// Apply a finished providers request. The previous list is kept on failure.
    pub fn apply_providers(&mut self, result: Result<Vec<Provider>, RequestError>) {
        match result {
            Ok(providers) => {
                let previous = self.selected_provider().map(|p| p.id.clone());
                self.providers = providers;
                self.load_error = None;
                // Keep the highlight on the same provider across refreshes
                let index = previous.and_then(|id| self.providers.iter().position(|p| p.id == id));
                self.list_state.select(index);
                self.list_state.clamp_to(self.providers.len());
            }
            Err(e) => {
                warn!("Failed to load providers: {}", e);
                self.load_error = Some(PROVIDERS_LOAD_ERROR.to_string());
            }
        }
    }

    fn provider_item(provider: &Provider) -> ListItem<'static> {
        let t = theme();
        ListItem::new(vec![
            Line::from(Span::styled(provider.name.clone(), t.text_style())),
            Line::from(vec![
                Span::styled("  \u{1F4C5} ", t.title_style()),
                Span::styled(WORKING_DAYS, t.muted_style()),
            ]),
            Line::from(vec![
                Span::styled("  \u{1F552} ", t.title_style()),
                Span::styled(WORKING_HOURS, t.muted_style()),
            ]),
            Line::default(),
        ])
    }
}

impl Screen for DashboardScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, Header::HEIGHT, Footer::HEIGHT);

        let greeting = match ctx.auth.user() {
            Some(user) => format!("Welcome, {}", user.name),
            None => "Welcome".to_string(),
        };
        Header::render(frame, header, &greeting, ctx.auth.user().map(|u| u.email.as_str()));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(format!(" {} ", PROVIDERS_TITLE))
            .title_style(t.title_style());

        if let Some(error) = &self.load_error {
            let message = Paragraph::new(vec![
                Line::styled(error.clone(), t.error_style()),
                Line::styled(
                    format!("Press {} to try again", ctx.config.keymap.key_for(Action::Refresh)),
                    t.muted_style(),
                ),
            ])
            .block(block);
            frame.render_widget(message, body);
        } else if self.providers.is_empty() {
            let text = if self.request.is_pending() {
                "Loading..."
            } else {
                "No hairdressers available"
            };
            frame.render_widget(
                Paragraph::new(Line::styled(text, t.muted_style())).block(block),
                body,
            );
        } else {
            let items: Vec<ListItem> = self.providers.iter().map(Self::provider_item).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(t.highlight_style())
                .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
            frame.render_stateful_widget(list, body, &mut self.list_state);
        }

        let hints = ctx.config.keymap.hints(&[
            Action::Confirm,
            Action::OpenProfile,
            Action::Refresh,
            Action::SignOut,
            Action::Quit,
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
        let Some(action) = ctx.config.keymap.action_for(&key) else {
            return Ok(ScreenAction::None);
        };

        if self.list_state.navigate(action, self.providers.len()) {
            return Ok(ScreenAction::None);
        }

        Ok(match action {
            Action::Confirm | Action::Select => match self.selected_provider() {
                Some(provider) => ScreenAction::Navigate(Route::CreateAppointment {
                    provider_id: provider.id.clone(),
                }),
                None => ScreenAction::None,
            },
            Action::OpenProfile => ScreenAction::Navigate(Route::Profile),
            Action::Refresh => {
                self.refresh(ctx);
                ScreenAction::None
            }
            Action::SignOut => ScreenAction::SignOut,
            Action::Quit => ScreenAction::Quit,
            _ => ScreenAction::None,
        })
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Some(result) = self.request.poll() {
            self.apply_providers(result);
        }
        Ok(ScreenAction::None)
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        self.refresh(ctx);
        Ok(())
    }
}
