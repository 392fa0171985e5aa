//! User interface layer for StayHub
//!
//! This crate provides the presentation-side state of the hotel-booking
//! front end: the display-mode theme, design tokens, routes, the loading
//! overlay and the audience shells that compose them.
//!
//! # Modules
//!
//! - [`theme`] - Display mode provider and derived style classes
//! - [`tokens`] - Design tokens (style classes, layers)
//! - [`navigation`] - Routes, router and header actions
//! - [`booking`] - Booking data shapes referenced by routes
//! - [`overlay`] - Loading overlay
//! - [`shell`] - Guest and console shells
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{Route, Router};
//! use app_ui::theme::{DisplayMode, ThemeClasses};
//!
//! let router = Router::new();
//! assert_eq!(router.match_path("/partner"), Route::PartnerDashboard);
//!
//! let classes = ThemeClasses::for_mode(DisplayMode::Primary);
//! assert_eq!(classes.text, "text-white");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod booking;
pub mod navigation;
pub mod overlay;
pub mod shell;
pub mod theme;
pub mod tokens;

// Re-export commonly used types
pub use theme::{DisplayMode, ThemeClasses, ThemeHandle, ThemeProvider, ThemeState};

pub use tokens::{class, z_index};

pub use navigation::{Audience, NavAction, Route, RouteError, RouteParams, Router};

pub use booking::{BookingStatus, StayDates};

pub use overlay::{InputTarget, LoadingOverlay};

pub use shell::{transition_config, ConsoleShell, Frame, GuestShell, NavItem, PageContent};
