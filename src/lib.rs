//! GoBarber - book salon and barber appointments from the terminal
//!
//! This library provides the booking API client, the session and booking
//! state, and the screens of the terminal interface.

// Core modules
pub mod api;
pub mod app;
pub mod appointment;
pub mod availability;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod models;
pub mod screens;
pub mod services;
pub mod session;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use api::{ApiClient, RequestError};
pub use config::Config;
pub use session::{AuthContext, Session};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
