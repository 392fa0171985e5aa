//! Storage layer for StayHub
//!
//! This crate provides the client-side persistence medium: a key-value
//! store for settings and the access-token store the auth-presence state
//! reads from.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod token;

pub use kv::{KvConfig, KvError, KvStore};
pub use token::{TokenMedium, TokenStore, ACCESS_TOKEN_KEY};
