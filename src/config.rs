//! Application configuration

use i18n::I18nConfig;
use storage::KvConfig;

/// Environment variable selecting the UI locale
pub const ENV_LOCALE: &str = "STAYHUB_LOCALE";
/// Environment variable selecting the key-value store path
pub const ENV_KV_PATH: &str = "STAYHUB_KV_PATH";
/// Environment variable selecting the default log filter
pub const ENV_LOG: &str = "STAYHUB_LOG";

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct StayhubConfig {
    /// Key-value store settings; `None` means no storage medium exists
    pub kv: Option<KvConfig>,
    /// Localization settings
    pub i18n: I18nConfig,
    /// Default tracing filter
    pub log_filter: String,
}

impl Default for StayhubConfig {
    fn default() -> Self {
        Self {
            kv: Some(KvConfig::default()),
            i18n: I18nConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl StayhubConfig {
    /// Defaults overridden by `STAYHUB_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(locale) = lookup(ENV_LOCALE) {
            config = config.locale(locale);
        }
        if let Some(path) = lookup(ENV_KV_PATH) {
            config = config.kv_path(path);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config = config.log_filter(filter);
        }
        config
    }

    /// Store settings under `path`
    pub fn kv_path(mut self, path: impl Into<String>) -> Self {
        let kv = self.kv.take().unwrap_or_default();
        self.kv = Some(KvConfig { path: path.into(), ..kv });
        self
    }

    /// Run without a storage medium, as during non-interactive rendering
    pub fn without_storage(mut self) -> Self {
        self.kv = None;
        self
    }

    /// Request a UI locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.i18n = I18nConfig::new(locale);
        self
    }

    /// Set the default tracing filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}
