//! `[base]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Ada Lovelace"
/// author = "Ada"
/// language = "en-GB"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, written into the starter page `<title>`s by `init`.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Starter page `<meta name="author">`.
    #[serde(default)]
    pub author: String,

    /// BCP 47 language code for the `lang` attribute of starter pages.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Ada Lovelace"
            author = "Ada"
            language = "en-GB"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Ada Lovelace");
        assert_eq!(config.base.author, "Ada");
        assert_eq!(config.base.language, "en-GB");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "Portfolio");
        assert_eq!(config.base.author, "");
        assert_eq!(config.base.language, "en");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            url = "https://example.com"
        "#;
        let err = toml::from_str::<SiteConfig>(config).unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
