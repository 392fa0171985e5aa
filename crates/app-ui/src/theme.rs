//! Display mode and theme provider for StayHub
//!
//! The partner and admin consoles support two display modes:
//! - Light: white surfaces with dark text
//! - Primary: brand-colored surfaces with light text
//!
//! The mode is not persisted. Every fresh mount of [`ThemeProvider`] starts
//! in [`DisplayMode::Light`]. Style classes are a fixed function of the
//! mode, see [`ThemeClasses::for_mode`].
//!
//! # Usage
//!
//! ```rust
//! use app_state::ProviderScope;
//! use app_ui::theme::{DisplayMode, ThemeHandle, ThemeProvider};
//!
//! let provider = ThemeProvider::mount();
//! let mut scope = ProviderScope::new();
//! provider.provide(&mut scope);
//!
//! let theme = ThemeHandle::from_scope(&scope).unwrap();
//! theme.toggle_mode().unwrap();
//! assert_eq!(theme.mode().unwrap(), DisplayMode::Primary);
//! assert_eq!(theme.background_class().unwrap(), "bg-primary-600");
//! ```

use app_state::provider::{Handle, ProvidedState, Provider, ProviderScope, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::tokens::class;

// =============================================================================
// Display Mode
// =============================================================================

/// Display mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Light mode
    #[default]
    Light,
    /// Brand-colored mode
    Primary,
}

impl DisplayMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Primary,
            DisplayMode::Primary => DisplayMode::Light,
        }
    }

    /// All modes
    pub fn all() -> [DisplayMode; 2] {
        [DisplayMode::Light, DisplayMode::Primary]
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Light => write!(f, "Light"),
            DisplayMode::Primary => write!(f, "Primary"),
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(DisplayMode::Light),
            "primary" => Ok(DisplayMode::Primary),
            _ => Err(format!("Unknown display mode: {}", s)),
        }
    }
}

// =============================================================================
// Derived Classes
// =============================================================================

/// Style classes derived from a display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeClasses {
    /// Page background
    pub background: &'static str,
    /// Body text
    pub text: &'static str,
    /// Borders and dividers
    pub border: &'static str,
    /// Card surface
    pub card: &'static str,
}

impl ThemeClasses {
    /// Classes for `mode`
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Light => Self {
                background: class::light::BACKGROUND,
                text: class::light::TEXT,
                border: class::light::BORDER,
                card: class::light::CARD,
            },
            DisplayMode::Primary => Self {
                background: class::primary::BACKGROUND,
                text: class::primary::TEXT,
                border: class::primary::BORDER,
                card: class::primary::CARD,
            },
        }
    }
}

// =============================================================================
// Theme Provider
// =============================================================================

/// Theme provider state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeState {
    /// Current display mode
    pub mode: DisplayMode,
}

impl ThemeState {
    /// Derived style classes
    pub fn classes(&self) -> ThemeClasses {
        ThemeClasses::for_mode(self.mode)
    }
}

impl ProvidedState for ThemeState {
    const PROVIDER: &'static str = "ThemeProvider";
}

/// Owner of the theme state
#[derive(Debug)]
pub struct ThemeProvider {
    inner: Provider<ThemeState>,
}

impl ThemeProvider {
    /// Mount a theme provider in light mode
    pub fn mount() -> Self {
        Self { inner: Provider::mount(ThemeState::default()) }
    }

    /// Register this provider in a render scope
    pub fn provide(&self, scope: &mut ProviderScope) {
        self.inner.provide(scope);
    }

    /// Create a consumer handle
    pub fn handle(&self) -> ThemeHandle {
        ThemeHandle { inner: self.inner.handle() }
    }

    /// Current display mode
    pub fn mode(&self) -> DisplayMode {
        self.inner.read(|s| s.mode)
    }

    /// Subscribe to theme changes
    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.inner.subscribe()
    }
}

/// Consumer access to the theme state
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    inner: Handle<ThemeState>,
}

impl ThemeHandle {
    /// Find the theme mounted above `scope`
    pub fn from_scope(scope: &ProviderScope) -> Result<Self> {
        Ok(Self { inner: scope.handle::<ThemeState>()? })
    }

    /// Current display mode
    pub fn mode(&self) -> Result<DisplayMode> {
        self.inner.read(|s| s.mode)
    }

    /// Set the display mode
    pub fn set_mode(&self, mode: DisplayMode) -> Result<()> {
        self.inner.update(|s| s.mode = mode)?;
        tracing::debug!(%mode, "display mode set");
        Ok(())
    }

    /// Switch to the other display mode, returning the new one
    pub fn toggle_mode(&self) -> Result<DisplayMode> {
        let mode = self.inner.update(|s| {
            s.mode = s.mode.toggled();
            s.mode
        })?;
        tracing::debug!(%mode, "display mode toggled");
        Ok(mode)
    }

    /// All derived classes
    pub fn classes(&self) -> Result<ThemeClasses> {
        self.inner.read(ThemeState::classes)
    }

    /// Background class
    pub fn background_class(&self) -> Result<&'static str> {
        Ok(self.classes()?.background)
    }

    /// Text class
    pub fn text_class(&self) -> Result<&'static str> {
        Ok(self.classes()?.text)
    }

    /// Border class
    pub fn border_class(&self) -> Result<&'static str> {
        Ok(self.classes()?.border)
    }

    /// Card class
    pub fn card_class(&self) -> Result<&'static str> {
        Ok(self.classes()?.card)
    }

    /// Subscribe to theme changes
    pub fn subscribe(&self) -> Result<watch::Receiver<ThemeState>> {
        self.inner.subscribe()
    }
}
