//! Design tokens for StayHub
//!
//! Symbolic style names shared with the stylesheet. The stylesheet resolves
//! them into concrete values; this crate only references them by name.

// =============================================================================
// Style Class Tokens
// =============================================================================

/// Style classes per display mode
pub mod class {
    /// Classes for the light display mode
    pub mod light {
        /// Page background
        pub const BACKGROUND: &str = "bg-white";
        /// Body text
        pub const TEXT: &str = "text-gray-900";
        /// Borders and dividers
        pub const BORDER: &str = "border-gray-200";
        /// Card surface
        pub const CARD: &str = "bg-white shadow-sm";
    }

    /// Classes for the primary (brand) display mode
    pub mod primary {
        /// Page background
        pub const BACKGROUND: &str = "bg-primary-600";
        /// Body text
        pub const TEXT: &str = "text-white";
        /// Borders and dividers
        pub const BORDER: &str = "border-primary-400";
        /// Card surface
        pub const CARD: &str = "bg-primary-700 shadow-md";
    }

    /// Loading overlay backdrop
    pub const OVERLAY: &str = "fixed inset-0 bg-black/40 backdrop-blur-sm";
    /// Loading spinner
    pub const SPINNER: &str = "animate-spin text-primary-500";
}

// =============================================================================
// Z-Index Layers
// =============================================================================

/// Stacking layers
pub mod z_index {
    /// Default layer
    pub const DEFAULT: i32 = 0;
    /// Fixed elements (headers, sidebars)
    pub const FIXED: i32 = 30;
    /// Modal content
    pub const MODAL: i32 = 50;
    /// Maximum (loading overlay)
    pub const MAX: i32 = 9999;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_use_distinct_classes() {
        assert_ne!(class::light::BACKGROUND, class::primary::BACKGROUND);
        assert_ne!(class::light::TEXT, class::primary::TEXT);
        assert_ne!(class::light::BORDER, class::primary::BORDER);
        assert_ne!(class::light::CARD, class::primary::CARD);
    }

    #[test]
    fn test_overlay_on_top() {
        assert!(z_index::MAX > z_index::MODAL);
        assert!(z_index::MODAL > z_index::FIXED);
        assert!(z_index::FIXED > z_index::DEFAULT);
    }
}
