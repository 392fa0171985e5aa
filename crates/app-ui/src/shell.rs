//! Audience shells
//!
//! Each top-level layout nests the global state providers around the route
//! content:
//! - [`GuestShell`] (guest and account pages): auth presence, then the
//!   loading state, then the page. No page animation.
//! - [`ConsoleShell`] (partner and admin pages): the theme, then the page
//!   transition sequencer, then the page. Partner pages swap after 150ms,
//!   admin pages after 500ms.
//!
//! Shells produce a [`Frame`], the view model the host renderer draws.

use app_state::provider::{ProviderScope, Result};
use app_state::transition::{PageTransitionSequencer, TransitionConfig, Visibility};
use app_state::{AuthPresenceState, LoadingHandle, LoadingProvider};
use i18n::Translator;
use serde::Serialize;

use crate::navigation::{Audience, NavAction, Route};
use crate::overlay::LoadingOverlay;
use crate::theme::{ThemeClasses, ThemeHandle, ThemeProvider};

/// What a route renders as page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContent {
    /// The route
    pub route: Route,
    /// Canonical path
    pub path: String,
    /// Page title
    pub title: &'static str,
}

impl PageContent {
    /// Content for `route`
    pub fn for_route(route: &Route) -> Self {
        Self { route: route.clone(), path: route.to_path(), title: route.title() }
    }
}

/// Localized header action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// The action
    pub action: NavAction,
    /// Localized label
    pub label: String,
}

/// One rendered frame of a shell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Page content on screen
    pub content: PageContent,
    /// Theme classes (console shells)
    pub classes: Option<ThemeClasses>,
    /// Loading overlay (guest shells, while busy)
    pub overlay: Option<LoadingOverlay>,
    /// Header actions (guest shells)
    pub nav: Vec<NavItem>,
    /// Visibility the page is driven towards
    pub visibility: Visibility,
    /// Whether a content swap is pending
    pub transitioning: bool,
}

// =============================================================================
// Guest Shell
// =============================================================================

/// Shell for guest and account pages
#[derive(Debug)]
pub struct GuestShell {
    auth: AuthPresenceState,
    loading: LoadingProvider,
    scope: ProviderScope,
    translator: Translator,
}

impl GuestShell {
    /// Mount the shell, creating its loading provider
    pub fn mount(auth: AuthPresenceState, translator: Translator) -> Self {
        let loading = LoadingProvider::mount();
        let mut scope = ProviderScope::new();
        loading.provide(&mut scope);
        Self { auth, loading, scope, translator }
    }

    /// Render scope for pages inside the shell
    pub fn scope(&self) -> &ProviderScope {
        &self.scope
    }

    /// Auth presence used by the header
    pub fn auth(&self) -> &AuthPresenceState {
        &self.auth
    }

    /// Loading handle for pages inside the shell
    pub fn loading(&self) -> Result<LoadingHandle> {
        LoadingHandle::from_scope(&self.scope)
    }

    /// Header actions for the current auth presence
    pub fn nav_items(&self) -> Vec<NavItem> {
        NavAction::for_presence(self.auth.is_present())
            .into_iter()
            .map(|action| NavItem { action, label: self.translator.translate(action.message_id()) })
            .collect()
    }

    /// Handle a header action, returning where to navigate next
    pub fn activate(&self, action: NavAction) -> Option<Route> {
        if action == NavAction::LogOut {
            self.auth.clear_token();
            return Some(Route::Home);
        }
        action.target()
    }

    /// Render `route` inside the shell
    pub fn render(&self, route: &Route) -> Frame {
        let overlay = LoadingOverlay::render(self.loading.is_loading(), &self.translator);
        Frame {
            content: PageContent::for_route(route),
            classes: None,
            overlay,
            nav: self.nav_items(),
            visibility: Visibility::Visible,
            transitioning: false,
        }
    }
}

// =============================================================================
// Console Shell
// =============================================================================

/// Exit delay for an audience's page transitions
pub fn transition_config(audience: Audience) -> TransitionConfig {
    match audience {
        Audience::Admin => TransitionConfig::slow(),
        _ => TransitionConfig::fast(),
    }
}

/// Shell for partner and admin pages
///
/// Must be driven from inside a tokio runtime.
pub struct ConsoleShell {
    audience: Audience,
    theme: ThemeProvider,
    sequencer: PageTransitionSequencer<Route, PageContent>,
    scope: ProviderScope,
}

impl std::fmt::Debug for ConsoleShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleShell")
            .field("audience", &self.audience)
            .field("theme", &self.theme)
            .field("displayed", &self.sequencer.displayed().path)
            .finish()
    }
}

impl ConsoleShell {
    /// Mount the shell on its initial route
    pub fn mount(audience: Audience, initial: Route) -> Self {
        Self::with_config(audience, transition_config(audience), initial)
    }

    /// Mount the shell with an explicit transition configuration
    pub fn with_config(audience: Audience, config: TransitionConfig, initial: Route) -> Self {
        let theme = ThemeProvider::mount();
        let mut scope = ProviderScope::new();
        theme.provide(&mut scope);

        let content = PageContent::for_route(&initial);
        let sequencer = PageTransitionSequencer::new(config, initial, content);
        tracing::debug!(?audience, delay = ?config.exit_delay, "console shell mounted");

        Self { audience, theme, sequencer, scope }
    }

    /// Audience this shell serves
    pub fn audience(&self) -> Audience {
        self.audience
    }

    /// Render scope for pages inside the shell
    pub fn scope(&self) -> &ProviderScope {
        &self.scope
    }

    /// Theme handle for pages inside the shell
    pub fn theme(&self) -> Result<ThemeHandle> {
        ThemeHandle::from_scope(&self.scope)
    }

    /// The transition sequencer
    pub fn sequencer(&self) -> &PageTransitionSequencer<Route, PageContent> {
        &self.sequencer
    }

    /// Report the router's current route
    pub fn route_changed(&self, route: Route) {
        if route.audience() != self.audience {
            tracing::warn!(?route, audience = ?self.audience, "route rendered in another audience's shell");
        }
        let content = PageContent::for_route(&route);
        self.sequencer.route_changed(route, content);
    }

    /// Render the current frame
    pub fn render(&self) -> Frame {
        let snapshot = self.sequencer.snapshot();
        Frame {
            content: snapshot.displayed.clone(),
            classes: Some(ThemeClasses::for_mode(self.theme.mode())),
            overlay: None,
            nav: Vec::new(),
            visibility: snapshot.visibility,
            transitioning: snapshot.is_transitioning(),
        }
    }
}
