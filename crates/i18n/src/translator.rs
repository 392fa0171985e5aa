//! Message lookup and formatting over fluent bundles

use fluent::{FluentArgs, FluentBundle, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::lang::{negotiate, I18nConfig};
use crate::{I18nError, Result};

fn bundled_source(locale: &LanguageIdentifier) -> Option<&'static str> {
    match locale.to_string().as_str() {
        "en-US" => Some(include_str!("../locales/en-US.ftl")),
        "ko-KR" => Some(include_str!("../locales/ko-KR.ftl")),
        _ => None,
    }
}

fn load_bundle(locale: LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
    let tag = locale.to_string();
    let source = bundled_source(&locale).ok_or_else(|| I18nError::InvalidLocale(tag.clone()))?;

    let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
        I18nError::Resource { locale: tag.clone(), reason: format!("{:?}", errors) }
    })?;

    let mut bundle = FluentBundle::new(vec![locale]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| I18nError::Resource { locale: tag, reason: format!("{:?}", errors) })?;
    Ok(bundle)
}

/// Translator over the negotiated locale chain
pub struct Translator {
    bundles: Vec<FluentBundle<FluentResource>>,
    locales: Vec<LanguageIdentifier>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator").field("locales", &self.locales).finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        // the default chain only contains bundled locales
        Self::new(&I18nConfig::default()).unwrap_or(Self { bundles: Vec::new(), locales: Vec::new() })
    }
}

impl Translator {
    /// Build a translator for the requested locales
    pub fn new(config: &I18nConfig) -> Result<Self> {
        let locales = negotiate(&config.requested);
        let bundles = locales
            .iter()
            .cloned()
            .map(load_bundle)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(?locales, "translator ready");
        Ok(Self { bundles, locales })
    }

    /// The active locale
    pub fn locale(&self) -> Option<&LanguageIdentifier> {
        self.locales.first()
    }

    /// Translate a message without arguments
    pub fn translate(&self, id: &str) -> String {
        self.format(id, None)
    }

    /// Translate a message with arguments
    pub fn translate_with_args(&self, id: &str, args: &FluentArgs<'_>) -> String {
        self.format(id, Some(args))
    }

    fn format(&self, id: &str, args: Option<&FluentArgs<'_>>) -> String {
        for bundle in &self.bundles {
            let Some(pattern) = bundle.get_message(id).and_then(|m| m.value()) else {
                continue;
            };
            let mut errors = Vec::new();
            let value = bundle.format_pattern(pattern, args, &mut errors);
            if !errors.is_empty() {
                tracing::warn!(id, ?errors, "message formatted with errors");
            }
            return value.into_owned();
        }

        tracing::warn!(id, "missing translation");
        id.to_string()
    }
}
