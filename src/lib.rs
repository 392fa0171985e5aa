//! StayHub front-end state layer
//!
//! Ties the workspace crates together: configuration, tracing setup, and
//! the [`App`] that opens storage and mounts the shell a route belongs to.
//!
//! # Example
//!
//! ```rust
//! use stayhub::{App, Shell, StayhubConfig};
//!
//! let app = App::new(StayhubConfig::default().without_storage()).unwrap();
//! assert!(!app.auth().is_present());
//!
//! match app.shell_for("/search?destination=Busan").unwrap() {
//!     Shell::Guest(shell) => assert!(shell.render(&app.route("/")).overlay.is_none()),
//!     Shell::Console(_) => unreachable!("search is a guest page"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod telemetry;

pub use app::{App, Shell};
pub use config::StayhubConfig;
pub use telemetry::init_tracing;

pub use app_state::{AuthPresenceState, LoadingHandle, ProviderError};
pub use app_ui::{ConsoleShell, DisplayMode, Frame, GuestShell, Route};

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Translations could not be loaded
    #[error("Localization error: {0}")]
    I18n(#[from] i18n::I18nError),

    /// Provider-scoped state misused
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Tracing subscriber could not be installed
    #[error("Tracing setup failed: {0}")]
    Tracing(String),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;
