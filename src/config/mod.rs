//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[base]`         | Site metadata (title, author, language)        |
//! | `[build]`        | Site layout paths, minify, clean               |
//! | `[site]`         | Always-loaded data, overlay id, placeholder    |
//! | `[pages]`        | Page key → data documents overrides            |
//! | `[[components]]` | Component slots injected into every page       |
//! | `[behavior]`     | Runtime script toggles and timings             |
//! | `[serve]`        | Preview server (port, interface, watch)        |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Ada Lovelace"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [pages]
//! talks = ["news"]
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod handle;
mod serve;
mod site;

pub use handle::{cfg, init_config, reload_config};

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use serve::ServeConfig;
pub use site::{BehaviorConfig, SiteSection};

use crate::{
    cli::{Cli, Commands},
    loader::ComponentSlot,
    log,
};
use anyhow::{Result, bail};
use educe::Educe;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub site: SiteSection,

    /// Extra or replacement entries for the page → data mapping.
    #[serde(default)]
    pub pages: FxHashMap<String, Vec<String>>,

    #[serde(default = "defaults::site::components")]
    #[educe(Default = defaults::site::components())]
    pub components: Vec<ComponentSlot>,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Read the config the CLI points at (defaults when absent) and apply the
    /// CLI on top of it.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if !cli.is_init() && config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            self.build.clean |= args.clean;
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        for dir in [
            &mut self.build.data,
            &mut self.build.components,
            &mut self.build.pages,
            &mut self.build.assets,
            &mut self.build.output,
        ] {
            *dir = Self::normalize_path(&root.join(&*dir));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for `build` and `serve`.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if !self.build.pages.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.pages] `{}` is not a directory",
                self.build.pages.display()
            )));
        }

        // Missing data or components degrade pages instead of failing them
        for (field, dir) in [
            ("[build.data]", &self.build.data),
            ("[build.components]", &self.build.components),
        ] {
            if !dir.is_dir() {
                log!("warn"; "{field} `{}` not found", dir.display());
            }
        }

        if self.build.output == self.get_root() {
            bail!(ConfigError::Validation(
                "[build.output] must not be the site root".into()
            ));
        }

        for slot in &self.components {
            if slot.name.is_empty() || slot.target.is_empty() {
                bail!(ConfigError::Validation(
                    "[[components]] entries need both `name` and `target`".into()
                ));
            }
        }

        if self.site.overlay.is_empty() {
            bail!(ConfigError::Validation("[site.overlay] must not be empty".into()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
