//! Application services layer.
//!
//! Services sit between the screens and the API client. Screens never await
//! network calls themselves; they hand futures to a service and poll for the
//! result on each tick of the UI loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   UI Layer                      │
//! │  (App, Screens, Widgets)                        │
//! └─────────────────────┬───────────────────────────┘
//!                       │  start / poll
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │               Services Layer                    │
//! │  ┌───────────────┐                              │
//! │  │ LatestRequest │  (tokio task + oneshot)      │
//! │  └───────────────┘                              │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │             Infrastructure Layer                │
//! │  (ApiClient, Config)                            │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod request;

pub use request::LatestRequest;
