//! Shared plumbing for CLI commands.
//!
//! - `CliContext`: loaded config, API client and a runtime to drive it
//! - Output helpers: `print_success`, `print_error`, `print_info`

use crate::api::ApiClient;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::future::Future;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

/// Bearer token used instead of signing in.
pub const TOKEN_ENV: &str = "GOBARBER_TOKEN";

/// Password for `--email` sign-in. Never taken as an argument.
pub const PASSWORD_ENV: &str = "GOBARBER_PASSWORD";

/// How a CLI invocation authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Password { email: String, password: String },
    Token(String),
}

impl Credentials {
    /// Pick credentials from `--email` and the environment values.
    ///
    /// An explicit email wins over a token so a stale `GOBARBER_TOKEN` can be
    /// bypassed.
    pub fn resolve(email: Option<&str>, password: Option<String>, token: Option<String>) -> Result<Self> {
        let token = token.filter(|t| !t.trim().is_empty());
        match (email, password, token) {
            (Some(email), Some(password), _) if !password.is_empty() => Ok(Credentials::Password {
                email: email.trim().to_string(),
                password,
            }),
            (Some(_), _, _) => bail!("Set {} to sign in with --email", PASSWORD_ENV),
            (None, _, Some(token)) => Ok(Credentials::Token(token.trim().to_string())),
            (None, _, None) => bail!("Not signed in. Pass --email (with {}) or set {}", PASSWORD_ENV, TOKEN_ENV),
        }
    }

    pub fn from_env(email: Option<&str>) -> Result<Self> {
        Self::resolve(
            email,
            std::env::var(PASSWORD_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        )
    }
}

/// Everything a command needs to talk to the API.
pub struct CliContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub api: ApiClient,
    runtime: Runtime,
}

impl CliContext {
    pub fn load() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config = Config::load_or_create(&config_path).context("Failed to load configuration")?;
        Self::with_config(config, config_path)
    }

    pub fn with_config(config: Config, config_path: PathBuf) -> Result<Self> {
        let api_url = config.effective_api_url();
        let api = ApiClient::new(&api_url, config.request_timeout())
            .with_context(|| format!("Failed to create API client for {}", api_url))?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            config,
            config_path,
            api,
            runtime,
        })
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// An authenticated client, signing in first when credentials are a password.
    pub fn authenticate(&self, credentials: Credentials) -> Result<ApiClient> {
        match credentials {
            Credentials::Token(token) => Ok(self.api.with_token(token)),
            Credentials::Password { email, password } => {
                info!("Signing in from the CLI");
                let session = self
                    .block_on(self.api.sign_in(&email, &password))
                    .context("Authentication error")?;
                Ok(self.api.with_token(session.token))
            }
        }
    }
}

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
