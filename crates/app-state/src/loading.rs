//! Global loading state
//!
//! A single busy flag that drives the full-viewport loading overlay.
//!
//! There is no counting: any number of `start_loading` calls collapse to one
//! busy flag and a single `stop_loading` clears it. Callers that nest
//! loading scopes must coordinate so that only the outermost one stops, or
//! switch to a reference-counted flag.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::provider::{Handle, ProvidedState, Provider, ProviderScope, Result};

/// Loading provider state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadingState {
    /// The busy flag
    pub is_loading: bool,
}

impl ProvidedState for LoadingState {
    const PROVIDER: &'static str = "LoadingProvider";
}

/// Owner of the loading state
#[derive(Debug)]
pub struct LoadingProvider {
    inner: Provider<LoadingState>,
}

impl LoadingProvider {
    /// Mount a loading provider with the flag cleared
    pub fn mount() -> Self {
        Self { inner: Provider::mount(LoadingState::default()) }
    }

    /// Register this provider in a render scope
    pub fn provide(&self, scope: &mut ProviderScope) {
        self.inner.provide(scope);
    }

    /// Create a consumer handle
    pub fn handle(&self) -> LoadingHandle {
        LoadingHandle { inner: self.inner.handle() }
    }

    /// Current busy flag
    pub fn is_loading(&self) -> bool {
        self.inner.read(|s| s.is_loading)
    }

    /// Subscribe to busy flag changes
    pub fn subscribe(&self) -> watch::Receiver<LoadingState> {
        self.inner.subscribe()
    }
}

/// Consumer access to the loading state
#[derive(Debug, Clone)]
pub struct LoadingHandle {
    inner: Handle<LoadingState>,
}

impl LoadingHandle {
    /// Find the loading state mounted above `scope`
    pub fn from_scope(scope: &ProviderScope) -> Result<Self> {
        Ok(Self { inner: scope.handle::<LoadingState>()? })
    }

    /// Current busy flag
    pub fn is_loading(&self) -> Result<bool> {
        self.inner.read(|s| s.is_loading)
    }

    /// Set the busy flag
    pub fn start_loading(&self) -> Result<()> {
        self.set(true)
    }

    /// Clear the busy flag, regardless of how many starts preceded it
    pub fn stop_loading(&self) -> Result<()> {
        self.set(false)
    }

    fn set(&self, busy: bool) -> Result<()> {
        let was = self.inner.update(|s| std::mem::replace(&mut s.is_loading, busy))?;
        if was != busy {
            tracing::debug!(busy, "loading state changed");
        }
        Ok(())
    }

    /// Subscribe to busy flag changes
    pub fn subscribe(&self) -> Result<watch::Receiver<LoadingState>> {
        self.inner.subscribe()
    }
}
