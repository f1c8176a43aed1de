//! Screen controllers for the application.
//!
//! Each screen owns its state, renders itself, and answers events with a
//! [`ScreenAction`]. The app keeps the screens on a navigation stack and is the
//! only place that applies those actions.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      App                               │
//! │  stack: [Dashboard, CreateAppointment, ...]            │
//! │                                                        │
//! │  top.handle_event(event, ctx) ──► ScreenAction         │
//! │  top.tick(ctx)                ──► ScreenAction         │
//! │                                     │                  │
//! │          Navigate / GoBack / ResetTo / ShowAlert /     │
//! │          SignedIn / UpdateUser / SignOut / Quit        │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod appointment_created;
pub mod create_appointment;
pub mod dashboard;
pub mod profile;
pub mod screen_trait;
pub mod sign_in;

pub use appointment_created::AppointmentCreatedScreen;
pub use create_appointment::CreateAppointmentScreen;
pub use dashboard::DashboardScreen;
pub use profile::ProfileScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use sign_in::SignInScreen;
