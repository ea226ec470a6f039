//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Portfolio".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn data() -> PathBuf {
        "data".into()
    }

    pub fn components() -> PathBuf {
        "components".into()
    }

    pub fn pages() -> PathBuf {
        "pages".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use crate::loader::ComponentSlot;

    pub fn always() -> Vec<String> {
        vec!["config".into(), "personal".into()]
    }

    pub fn overlay() -> String {
        "loading-overlay".into()
    }

    pub fn components() -> Vec<ComponentSlot> {
        vec![
            ComponentSlot::new("navbar", "navbar-placeholder"),
            ComponentSlot::new("footer", "footer-placeholder"),
        ]
    }
}

// ============================================================================
// [behavior] Section Defaults
// ============================================================================

pub mod behavior {
    pub fn scroll_threshold() -> u32 {
        100
    }

    pub fn skill_bar_delay() -> u32 {
        500
    }

    pub fn reveal_selectors() -> Vec<String> {
        [
            ".card",
            ".project-card",
            ".news-item",
            ".resource-card",
            ".course-card",
            ".cert-card",
            ".featured-card",
            ".timeline-item",
        ]
        .into_iter()
        .map(Into::into)
        .collect()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
