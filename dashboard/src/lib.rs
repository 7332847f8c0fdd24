//! Client-side state core for a freelance collaboration dashboard.
//!
//! The crate holds who is signed in ([`domain::SessionStore`]), which
//! projects exist and which the user joined or opened
//! ([`domain::ProjectStore`]), and per-project chat ([`domain::ChatLog`]).
//! [`context::AppContext`] composes them from [`config::DashboardSettings`].
//!
//! Logging goes through `tracing`; installing a subscriber is left to the
//! embedding application.

pub mod config;
pub mod context;
pub mod domain;
pub mod example_data;
pub mod outbound;

pub use config::DashboardSettings;
pub use context::{AppContext, DashboardCounts, ProjectTab, StartupError};
