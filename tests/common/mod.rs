//! Shared test utilities for screen flow integration tests.
//!
//! Provides `TestEnv` - a runtime, config and API client pointed at an
//! `httpmock` server, plus helpers to drive a screen's tick loop until its
//! background request finishes.

#![allow(dead_code)]

use gobarber::api::ApiClient;
use gobarber::config::Config;
use gobarber::models::User;
use gobarber::screens::{Screen, ScreenAction, ScreenContext};
use gobarber::session::{AuthContext, Session};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

pub const TOKEN: &str = "test-token";

/// How long a flow may wait for a mocked response.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn user() -> User {
    User {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        avatar_url: None,
    }
}

pub fn user_json(name: &str) -> Value {
    json!({
        "id": "u1",
        "name": name,
        "email": "ana@example.com",
        "avatar_url": null
    })
}

/// A signed-in environment talking to `base_url`.
pub struct TestEnv {
    pub runtime: Runtime,
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthContext,
}

impl TestEnv {
    pub fn new(base_url: &str) -> Self {
        let runtime = Runtime::new().unwrap();
        let mut config = Config::default();
        config.api_url = base_url.to_string();
        let api = ApiClient::new(base_url, config.request_timeout())
            .unwrap()
            .with_token(TOKEN);
        let mut auth = AuthContext::new();
        auth.sign_in(Session::new(user(), TOKEN));
        Self {
            runtime,
            config,
            api,
            auth,
        }
    }

    pub fn ctx(&self) -> ScreenContext<'_> {
        ScreenContext::new(&self.config, &self.api, self.runtime.handle(), &self.auth)
    }

    /// Tick `screen` until it returns an action, or panic after a timeout.
    pub fn next_action<S: Screen>(&self, screen: &mut S) -> ScreenAction {
        let ctx = self.ctx();
        let started = Instant::now();
        while started.elapsed() < SETTLE_TIMEOUT {
            let action = screen.tick(&ctx).unwrap();
            if !action.is_none() {
                return action;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("screen produced no action within {:?}", SETTLE_TIMEOUT);
    }

    /// Tick `screen` until `done` holds, or panic after a timeout.
    pub fn tick_until<S: Screen>(&self, screen: &mut S, done: impl Fn(&S) -> bool) {
        let ctx = self.ctx();
        let started = Instant::now();
        while started.elapsed() < SETTLE_TIMEOUT {
            screen.tick(&ctx).unwrap();
            if done(screen) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("condition not reached within {:?}", SETTLE_TIMEOUT);
    }

    /// Tick `screen` for `duration`, collecting every action it returns.
    pub fn tick_for<S: Screen>(&self, screen: &mut S, duration: Duration) -> Vec<ScreenAction> {
        let ctx = self.ctx();
        let started = Instant::now();
        let mut actions = Vec::new();
        while started.elapsed() < duration {
            let action = screen.tick(&ctx).unwrap();
            if !action.is_none() {
                actions.push(action);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        actions
    }
}
