//! Full-viewport loading overlay
//!
//! The overlay has no state of its own. [`LoadingOverlay::render`] is a pure
//! function of the busy flag, so the overlay is gone on the first render
//! after the flag clears.

use i18n::Translator;
use serde::Serialize;

use crate::tokens::{class, z_index};

/// Message id of the busy text
pub const LOADING_MESSAGE_ID: &str = "loading-message";

/// Where a pointer or key event lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// The page content receives the event
    Content,
    /// The overlay swallows the event
    Overlay,
}

/// Rendered loading overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingOverlay {
    /// Localized busy message
    pub message: String,
    /// Backdrop class
    pub class: &'static str,
    /// Spinner class
    pub spinner_class: &'static str,
    /// Stacking layer
    pub z_index: i32,
}

impl LoadingOverlay {
    /// Render the overlay for the current busy flag
    pub fn render(is_loading: bool, translator: &Translator) -> Option<Self> {
        is_loading.then(|| Self {
            message: translator.translate(LOADING_MESSAGE_ID),
            class: class::OVERLAY,
            spinner_class: class::SPINNER,
            z_index: z_index::MAX,
        })
    }

    /// Route an input event given the rendered overlay, if any
    pub fn input_target(overlay: Option<&Self>) -> InputTarget {
        match overlay {
            Some(_) => InputTarget::Overlay,
            None => InputTarget::Content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use i18n::I18nConfig;

    #[test]
    fn test_hidden_when_idle() {
        let t = Translator::default();
        let overlay = LoadingOverlay::render(false, &t);
        assert!(overlay.is_none());
        assert_eq!(LoadingOverlay::input_target(overlay.as_ref()), InputTarget::Content);
    }

    #[test]
    fn test_visible_and_blocking_when_busy() {
        let t = Translator::default();
        let overlay = LoadingOverlay::render(true, &t).unwrap();

        assert_eq!(overlay.message, "Loading, please wait...");
        assert_eq!(overlay.z_index, z_index::MAX);
        assert_eq!(LoadingOverlay::input_target(Some(&overlay)), InputTarget::Overlay);
    }

    #[test]
    fn test_localized_message() {
        let t = Translator::new(&I18nConfig::new("ko-KR")).unwrap();
        let overlay = LoadingOverlay::render(true, &t).unwrap();
        assert_eq!(overlay.message, "잠시만 기다려 주세요...");
    }
}
