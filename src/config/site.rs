//! `[site]` and `[behavior]` sections: how pages are composed.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml.
///
/// # Example
/// ```toml
/// [site]
/// always = ["config", "personal"]   # loaded for every page
/// overlay = "loading-overlay"       # removed once the page is composed
/// coming_soon = "Stay tuned"        # overrides config.json's comingSoon
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    #[serde(default = "defaults::site::always")]
    #[educe(Default = defaults::site::always())]
    pub always: Vec<String>,

    #[serde(default = "defaults::site::overlay")]
    #[educe(Default = defaults::site::overlay())]
    pub overlay: String,

    #[serde(default)]
    pub coming_soon: Option<String>,
}

/// `[behavior]` section: what the generated runtime script wires up.
///
/// # Example
/// ```toml
/// [behavior]
/// scroll_threshold = 50
/// skill_bar_delay = 800
/// smooth_scroll = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Mobile menu: `#navToggle` opens and closes `#navMenu`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub menu_toggle: bool,

    /// Navbar shadow once the page scrolls past `scroll_threshold` pixels.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub scroll_shadow: bool,

    #[serde(default = "defaults::behavior::scroll_threshold")]
    #[educe(Default = defaults::behavior::scroll_threshold())]
    pub scroll_threshold: u32,

    /// Fade elements in as they enter the viewport.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub reveal: bool,

    #[serde(default = "defaults::behavior::reveal_selectors")]
    #[educe(Default = defaults::behavior::reveal_selectors())]
    pub reveal_selectors: Vec<String>,

    /// Grow `.language-fill` bars from zero after `skill_bar_delay` ms.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub skill_bars: bool,

    #[serde(default = "defaults::behavior::skill_bar_delay")]
    #[educe(Default = defaults::behavior::skill_bar_delay())]
    pub skill_bar_delay: u32,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub smooth_scroll: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.site.always, vec!["config", "personal"]);
        assert_eq!(config.site.overlay, "loading-overlay");
        assert!(config.site.coming_soon.is_none());
        assert!(config.pages.is_empty());
        assert_eq!(config.components.len(), 2);
        assert_eq!(config.components[0].name, "navbar");
        assert_eq!(config.components[1].target, "footer-placeholder");
    }

    #[test]
    fn test_behavior_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert!(config.behavior.menu_toggle);
        assert_eq!(config.behavior.scroll_threshold, 100);
        assert_eq!(config.behavior.skill_bar_delay, 500);
        assert_eq!(config.behavior.reveal_selectors.len(), 8);
        assert!(config.behavior.smooth_scroll);
    }

    #[test]
    fn test_pages_and_components_override() {
        let config = r#"
            [pages]
            about = ["about", "education"]
            talks = ["news"]

            [[components]]
            name = "header"
            target = "header-slot"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.pages["about"], vec!["about", "education"]);
        assert_eq!(config.pages["talks"], vec!["news"]);
        assert_eq!(config.components.len(), 1);
        assert_eq!(config.components[0].target, "header-slot");
    }

    #[test]
    fn test_behavior_partial_override() {
        let config = r#"
            [behavior]
            scroll_threshold = 40
            reveal = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.behavior.scroll_threshold, 40);
        assert!(!config.behavior.reveal);
        assert!(config.behavior.skill_bars);
    }

    #[test]
    fn test_unknown_field_rejection() {
        assert!(toml::from_str::<SiteConfig>("[site]\nrouter = true").is_err());
        assert!(toml::from_str::<SiteConfig>("[behavior]\nparallax = true").is_err());
    }
}
