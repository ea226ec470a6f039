//! `[build]` section configuration.
//!
//! Site layout paths and output processing.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml.
///
/// Every path is relative to the site root and normalized to an absolute
/// path once the CLI has been applied.
///
/// # Example
/// ```toml
/// [build]
/// data = "data"              # JSON documents
/// components = "components"  # HTML fragments
/// pages = "pages"            # Page shells
/// output = "public"
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Site root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// JSON documents, fetched as `data/{name}.json`.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// HTML fragments, fetched as `components/{name}.html`.
    #[serde(default = "defaults::build::components")]
    #[educe(Default = defaults::build::components())]
    pub components: PathBuf,

    /// Page shells. Each `.html` file below it becomes one output page.
    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Static assets, copied verbatim to `<output>/assets`.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify HTML output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear output directory before each build.
    pub clean: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.root, None);
        assert_eq!(config.build.data, PathBuf::from("data"));
        assert_eq!(config.build.components, PathBuf::from("components"));
        assert_eq!(config.build.pages, PathBuf::from("pages"));
        assert_eq!(config.build.assets, PathBuf::from("assets"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(config.build.minify);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_config_custom_paths() {
        let config = r#"
            [build]
            data = "content/data"
            output = "dist"
            minify = false
            clean = true
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.data, PathBuf::from("content/data"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.build.minify);
        assert!(config.build.clean);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [build]
            templates = "templates"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
