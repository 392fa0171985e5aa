//! Application state management for StayHub
//!
//! This crate owns the global UI state every page depends on: the
//! provider/handle machinery, the loading flag, auth presence, and the
//! page-transition sequencer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod loading;
pub mod provider;
pub mod transition;

pub use auth::AuthPresenceState;
pub use loading::{LoadingHandle, LoadingProvider, LoadingState};
pub use provider::{Handle, ProvidedState, Provider, ProviderError, ProviderScope};
pub use transition::{
    PageTransitionSequencer, SwapTicket, TransitionConfig, TransitionEvent, TransitionMachine,
    TransitionPhase, TransitionSnapshot, Visibility,
};
