//! Internationalization for StayHub
//!
//! This crate provides the bundled translations, language negotiation,
//! and message formatting.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lang;
pub mod translator;

pub use lang::{negotiate, I18nConfig, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use translator::Translator;

/// i18n errors
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// Locale tag could not be parsed
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// A bundled resource failed to parse or load
    #[error("Invalid resource for {locale}: {reason}")]
    Resource {
        /// Locale of the resource
        locale: String,
        /// Parser or bundle errors
        reason: String,
    },
}

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;
