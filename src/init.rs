//! Site initialization module.
//!
//! Scaffolds a starter portfolio: `folio.toml`, sample data documents, the
//! navbar and footer components, one shell per page and a stylesheet.

use crate::{config::SiteConfig, log, render::fill_placeholders};
use anyhow::{Context, Result, bail};
use serde_json::json;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Which `[build]` directory a starter file belongs to.
#[derive(Debug, Clone, Copy)]
enum Dir {
    Data,
    Components,
    Pages,
    Assets,
}

macro_rules! starter {
    ($dir:ident, $sub:literal, $path:literal) => {
        (
            Dir::$dir,
            $path,
            include_str!(concat!("embed/init/", $sub, "/", $path)),
        )
    };
}

/// Starter files, relative to their configured directory.
const STARTER: &[(Dir, &str, &str)] = &[
    starter!(Data, "data", "config.json"),
    starter!(Data, "data", "personal.json"),
    starter!(Data, "data", "projects.json"),
    starter!(Data, "data", "courses.json"),
    starter!(Data, "data", "certifications.json"),
    starter!(Data, "data", "education.json"),
    starter!(Data, "data", "work.json"),
    starter!(Data, "data", "news.json"),
    starter!(Data, "data", "about.json"),
    starter!(Components, "components", "navbar.html"),
    starter!(Components, "components", "footer.html"),
    starter!(Pages, "pages", "index.html"),
    starter!(Pages, "pages", "about.html"),
    starter!(Pages, "pages", "projects.html"),
    starter!(Pages, "pages", "courses.html"),
    starter!(Pages, "pages", "journey.html"),
    starter!(Pages, "pages", "news.html"),
    starter!(Pages, "pages", "contact.html"),
    starter!(Assets, "assets", "css/style.css"),
];

impl Dir {
    fn path(self, config: &SiteConfig) -> &Path {
        match self {
            Self::Data => &config.build.data,
            Self::Components => &config.build.components,
            Self::Pages => &config.build.pages,
            Self::Assets => &config.build.assets,
        }
    }
}

/// Create a new site with the starter structure.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name the site is created in place, which must be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    let files = starter_files(config);
    if let Some(existing) = files.iter().map(|(path, _)| path).find(|p| p.exists()) {
        bail!(
            "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
            existing.display()
        );
    }

    for (path, content) in &files {
        write_file(path, content)?;
    }
    init_default_config(config)?;

    let output = config.build.output.strip_prefix(root).unwrap_or(&config.build.output);
    init_ignored_files(root, &[output])?;

    log!("init"; "created {} files in {}", files.len() + 1, root.display());
    Ok(())
}

/// Starter files mapped onto the configured layout. Page shells get the
/// `[base]` metadata filled in.
fn starter_files(config: &SiteConfig) -> Vec<(PathBuf, Cow<'static, str>)> {
    let base = json!({
        "siteTitle": config.base.title,
        "author": config.base.author,
        "language": config.base.language,
    });
    STARTER
        .iter()
        .map(|&(dir, path, content)| {
            let content = match dir {
                Dir::Pages => fill_placeholders(content, &base),
                _ => Cow::Borrowed(content),
            };
            (dir.path(config).join(path), content)
        })
        .collect()
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write default configuration file
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    write_file(&config.config_path, &content)
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}/\n"))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{build_site, portfolio_for},
        cli::Cli,
        model::{Project, collection},
    };
    use clap::Parser;
    use tempfile::TempDir;

    fn init_config(root: &Path, name: Option<&str>) -> SiteConfig {
        let mut args = vec!["folio", "-r", root.to_str().unwrap(), "init"];
        args.extend(name);
        let cli: &'static Cli = Box::leak(Box::new(Cli::parse_from(args)));
        SiteConfig::load(cli).unwrap()
    }

    #[test]
    fn test_new_site_layout() {
        let dir = TempDir::new().unwrap();
        let config = init_config(dir.path(), Some("me"));
        new_site(&config, true).unwrap();

        let root = dir.path().join("me");
        for path in [
            "folio.toml",
            "data/personal.json",
            "components/navbar.html",
            "pages/index.html",
            "assets/css/style.css",
        ] {
            assert!(root.join(path).is_file(), "{path}");
        }
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "/public/\n"
        );

        let written = SiteConfig::from_path(&root.join("folio.toml")).unwrap();
        assert_eq!(written.components.len(), 2);
    }

    #[test]
    fn test_new_site_refuses_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let config = init_config(dir.path(), None);
        assert!(new_site(&config, false).is_err());
    }

    #[test]
    fn test_new_site_refuses_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("me/data")).unwrap();
        fs::write(dir.path().join("me/data/personal.json"), "{}").unwrap();
        let config = init_config(dir.path(), Some("me"));

        assert!(new_site(&config, true).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("me/data/personal.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_starter_data_decodes() {
        let (_, _, projects) = STARTER
            .iter()
            .find(|(_, path, _)| *path == "projects.json")
            .unwrap();
        let doc: serde_json::Value = serde_json::from_str(projects).unwrap();
        let projects: Vec<Project> = collection(Some(&doc), "projects");
        assert_eq!(projects.len(), 1);
        assert!(projects[0].featured);
    }

    #[test]
    fn test_starter_site_builds() {
        let dir = TempDir::new().unwrap();
        let mut config = init_config(dir.path(), Some("me"));
        new_site(&config, true).unwrap();
        config.build.minify = false;

        build_site(&config, &portfolio_for(&config)).unwrap();

        let index = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(index.contains(r#"<h1 class="hero-title">Your Name</h1>"#));
        assert!(index.contains(r#"class="nav-link active" data-page="index""#));
        assert!(!index.contains("{{name}}"));
        assert!(!index.contains("loading-overlay"));
        assert!(index.contains(r#"<html lang="en">"#));
        assert!(index.contains("<title>Home | Portfolio</title>"));
        assert!(config.build.output.join("assets/css/style.css").is_file());
    }
}
