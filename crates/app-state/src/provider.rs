//! Provider-scoped UI state
//!
//! A [`Provider`] owns one piece of shared UI state for as long as it is
//! mounted. Consumers never own that state; they hold a [`Handle`], which
//! is a weak reference, and every access through a handle whose provider
//! has been unmounted fails with [`ProviderError::OutsideProvider`].
//!
//! [`ProviderScope`] is the render context handed down to subtrees. It
//! carries handles for whichever providers are mounted above the subtree,
//! and looking up one that is not mounted fails the same way.
//!
//! # Example
//!
//! ```rust
//! use app_state::loading::{LoadingHandle, LoadingProvider};
//! use app_state::provider::ProviderScope;
//!
//! let provider = LoadingProvider::mount();
//! let mut scope = ProviderScope::new();
//! provider.provide(&mut scope);
//!
//! let loading = LoadingHandle::from_scope(&scope).unwrap();
//! loading.start_loading().unwrap();
//! assert!(provider.is_loading());
//! ```

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::sync::watch;

/// Provider errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// State was accessed where its provider is not mounted
    #[error("{provider} state used outside provider")]
    OutsideProvider {
        /// Name of the missing provider
        provider: &'static str,
    },
}

/// Result type for provider-scoped access
pub type Result<T> = std::result::Result<T, ProviderError>;

/// State that can be owned by a [`Provider`]
pub trait ProvidedState: Clone + PartialEq + Send + Sync + 'static {
    /// Provider name reported in misuse errors
    const PROVIDER: &'static str;
}

struct Shared<T> {
    state: RwLock<T>,
    tx: watch::Sender<T>,
}

impl<T: ProvidedState> Shared<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.state.write();
        let before = state.clone();
        let out = f(&mut *state);
        if *state != before {
            let next = state.clone();
            drop(state);
            self.tx.send_replace(next);
        }
        out
    }
}

/// Owner of one piece of UI state
///
/// Dropping the provider unmounts it.
pub struct Provider<T: ProvidedState> {
    shared: Arc<Shared<T>>,
}

impl<T: ProvidedState> Provider<T> {
    /// Mount a provider with its initial state
    pub fn mount(initial: T) -> Self {
        let (tx, _) = watch::channel(initial.clone());
        tracing::debug!(provider = T::PROVIDER, "provider mounted");
        Self { shared: Arc::new(Shared { state: RwLock::new(initial), tx }) }
    }

    /// Create a consumer handle
    pub fn handle(&self) -> Handle<T> {
        Handle { shared: Arc::downgrade(&self.shared) }
    }

    /// Register this provider in a render scope
    pub fn provide(&self, scope: &mut ProviderScope) {
        scope.insert(self.handle());
    }

    /// Current state
    pub fn get(&self) -> T {
        self.shared.state.read().clone()
    }

    /// Read the state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.shared.state.read())
    }

    /// Mutate the state, publishing to subscribers if it changed
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.shared.update(f)
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.shared.tx.subscribe()
    }
}

impl<T: ProvidedState> Drop for Provider<T> {
    fn drop(&mut self) {
        tracing::debug!(provider = T::PROVIDER, "provider unmounted");
    }
}

impl<T: ProvidedState + std::fmt::Debug> std::fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("provider", &T::PROVIDER)
            .field("state", &*self.shared.state.read())
            .finish()
    }
}

/// Consumer reference to provider-owned state
pub struct Handle<T: ProvidedState> {
    shared: Weak<Shared<T>>,
}

impl<T: ProvidedState> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<T: ProvidedState> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("provider", &T::PROVIDER)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl<T: ProvidedState> Handle<T> {
    fn shared(&self) -> Result<Arc<Shared<T>>> {
        self.shared.upgrade().ok_or_else(|| outside_provider::<T>())
    }

    /// Whether the owning provider is still mounted
    pub fn is_mounted(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// Current state
    pub fn get(&self) -> Result<T> {
        Ok(self.shared()?.state.read().clone())
    }

    /// Read the state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        let shared = self.shared()?;
        let state = shared.state.read();
        Ok(f(&*state))
    }

    /// Mutate the state, publishing to subscribers if it changed
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        Ok(self.shared()?.update(f))
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> Result<watch::Receiver<T>> {
        Ok(self.shared()?.tx.subscribe())
    }
}

fn outside_provider<T: ProvidedState>() -> ProviderError {
    tracing::error!(provider = T::PROVIDER, "state used outside provider");
    ProviderError::OutsideProvider { provider: T::PROVIDER }
}

/// Render context carrying the handles mounted above a subtree
#[derive(Default, Clone)]
pub struct ProviderScope {
    handles: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for ProviderScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderScope").field("mounted", &self.handles.len()).finish()
    }
}

impl ProviderScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    fn insert<T: ProvidedState>(&mut self, handle: Handle<T>) {
        self.handles.insert(TypeId::of::<T>(), Arc::new(handle));
    }

    /// Look up the handle for `T`
    pub fn handle<T: ProvidedState>(&self) -> Result<Handle<T>> {
        self.handles
            .get(&TypeId::of::<T>())
            .and_then(|h| h.downcast_ref::<Handle<T>>())
            .cloned()
            .ok_or_else(|| outside_provider::<T>())
    }

    /// Whether a provider for `T` has been registered and is still mounted
    pub fn is_provided<T: ProvidedState>(&self) -> bool {
        self.handle::<T>().map(|h| h.is_mounted()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u32);

    impl ProvidedState for Counter {
        const PROVIDER: &'static str = "CounterProvider";
    }

    #[test]
    fn test_handle_reads_and_updates() {
        let provider = Provider::mount(Counter(1));
        let handle = provider.handle();

        assert_eq!(handle.get().unwrap(), Counter(1));
        handle.update(|c| c.0 += 1).unwrap();
        assert_eq!(provider.get(), Counter(2));
        assert_eq!(handle.read(|c| c.0).unwrap(), 2);
    }

    #[test]
    fn test_handle_fails_after_unmount() {
        let provider = Provider::mount(Counter(0));
        let handle = provider.handle();
        assert!(handle.is_mounted());

        drop(provider);

        assert!(!handle.is_mounted());
        assert_eq!(
            handle.get().unwrap_err(),
            ProviderError::OutsideProvider { provider: "CounterProvider" }
        );
        assert!(handle.update(|c| c.0 = 5).is_err());
        assert!(handle.subscribe().is_err());
    }

    #[test]
    fn test_scope_lookup() {
        let provider = Provider::mount(Counter(3));
        let mut scope = ProviderScope::new();
        assert!(!scope.is_provided::<Counter>());
        assert!(scope.handle::<Counter>().is_err());

        provider.provide(&mut scope);
        assert!(scope.is_provided::<Counter>());
        assert_eq!(scope.handle::<Counter>().unwrap().get().unwrap(), Counter(3));

        let child = scope.clone();
        drop(provider);
        assert!(!child.is_provided::<Counter>());
        assert!(child.handle::<Counter>().unwrap().get().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ProviderError::OutsideProvider { provider: "ThemeProvider" };
        assert_eq!(err.to_string(), "ThemeProvider state used outside provider");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let provider = Provider::mount(Counter(0));
        let mut rx = provider.subscribe();

        provider.update(|c| c.0 = 0);
        assert!(!rx.has_changed().unwrap());

        provider.update(|c| c.0 = 7);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Counter(7));
    }
}
