//! Application entry point
//!
//! [`App`] opens the storage medium once and hands the pieces to whichever
//! shell a route belongs to. A store that fails to open is treated like a
//! missing one: the app keeps running unauthenticated.

use std::sync::Arc;

use app_state::AuthPresenceState;
use app_ui::navigation::{Audience, Route, Router};
use app_ui::{ConsoleShell, GuestShell};
use i18n::Translator;
use storage::KvStore;

use crate::config::StayhubConfig;
use crate::Result;

/// The shell mounted for a route
#[derive(Debug)]
pub enum Shell {
    /// Guest or account page
    Guest(GuestShell),
    /// Partner or admin page
    Console(ConsoleShell),
}

/// Application root
#[derive(Debug)]
pub struct App {
    config: StayhubConfig,
    kv: Option<Arc<KvStore>>,
    auth: AuthPresenceState,
    router: Router,
}

impl App {
    /// Open storage and prepare the router
    pub fn new(config: StayhubConfig) -> Result<Self> {
        // fail early on broken translations rather than on first render
        Translator::new(&config.i18n)?;

        let kv = config.kv.clone().and_then(|kv_config| match KvStore::new(kv_config) {
            Ok(kv) => Some(Arc::new(kv)),
            Err(e) => {
                tracing::warn!(error = %e, "key-value store unavailable, running without storage");
                None
            }
        });

        let auth = match &kv {
            Some(kv) => AuthPresenceState::with_kv(Arc::clone(kv)),
            None => AuthPresenceState::unavailable(),
        };

        tracing::info!(storage = kv.is_some(), "stayhub app ready");
        Ok(Self { config, kv, auth, router: Router::new() })
    }

    /// Auth presence over the configured storage
    pub fn auth(&self) -> &AuthPresenceState {
        &self.auth
    }

    /// Key-value store, if one is open
    pub fn kv(&self) -> Option<&Arc<KvStore>> {
        self.kv.as_ref()
    }

    /// Resolve a path
    pub fn route(&self, path: &str) -> Route {
        self.router.match_path(path)
    }

    /// Resolve a path for rendering
    ///
    /// Routes that need a stored access token resolve to the login page
    /// while none is present.
    pub fn resolve(&self, path: &str) -> Route {
        let route = self.route(path);
        if route.requires_auth() && !self.auth.is_present() {
            tracing::debug!(path, "no access token, showing login");
            return Route::Login;
        }
        route
    }

    /// Translator for the configured locale
    pub fn translator(&self) -> Result<Translator> {
        Ok(Translator::new(&self.config.i18n)?)
    }

    /// Mount a guest shell
    pub fn guest_shell(&self) -> Result<GuestShell> {
        Ok(GuestShell::mount(self.auth.clone(), self.translator()?))
    }

    /// Mount the shell for `path`, after [`App::resolve`]
    ///
    /// Console shells must be mounted inside a tokio runtime.
    pub fn shell_for(&self, path: &str) -> Result<Shell> {
        let route = self.resolve(path);
        match route.audience() {
            Audience::Guest | Audience::Account => Ok(Shell::Guest(self.guest_shell()?)),
            audience @ (Audience::Partner | Audience::Admin) => {
                Ok(Shell::Console(ConsoleShell::mount(audience, route)))
            }
        }
    }
}
