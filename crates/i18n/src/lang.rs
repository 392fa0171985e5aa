//! Locale configuration and negotiation

use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use unic_langid::LanguageIdentifier;

use crate::{I18nError, Result};

/// Locale used when nothing better matches
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locales with bundled translations
pub const SUPPORTED_LOCALES: &[&str] = &["en-US", "ko-KR"];

/// Localization configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
    /// Requested locales, most preferred first
    pub requested: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self { requested: vec![DEFAULT_LOCALE.to_string()] }
    }
}

impl I18nConfig {
    /// Request a single locale
    pub fn new(locale: impl Into<String>) -> Self {
        Self { requested: vec![locale.into()] }
    }

    /// Append a lower-priority locale
    pub fn fallback(mut self, locale: impl Into<String>) -> Self {
        self.requested.push(locale.into());
        self
    }
}

/// Parse a locale tag
pub fn parse_locale(tag: &str) -> Result<LanguageIdentifier> {
    tag.parse::<LanguageIdentifier>()
        .map_err(|_| I18nError::InvalidLocale(tag.to_string()))
}

/// Pick the supported locales matching `requested`, best first
///
/// Unparseable tags are skipped. The default locale is always last.
pub fn negotiate(requested: &[String]) -> Vec<LanguageIdentifier> {
    let requested: Vec<LanguageIdentifier> = requested
        .iter()
        .filter_map(|tag| match parse_locale(tag) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "skipping requested locale");
                None
            }
        })
        .collect();

    let available: Vec<LanguageIdentifier> =
        SUPPORTED_LOCALES.iter().filter_map(|tag| tag.parse().ok()).collect();
    let default: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap_or_default();

    let mut chosen: Vec<LanguageIdentifier> = negotiate_languages(
        &requested,
        &available,
        Some(&default),
        NegotiationStrategy::Filtering,
    )
    .into_iter()
    .cloned()
    .collect();

    if !chosen.contains(&default) {
        chosen.push(default);
    }
    chosen
}
