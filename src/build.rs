//! Site building orchestration.
//!
//! Composes page shells and copies assets in parallel.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output() ──► clear (--clean) and create <output>
//!     │
//!     ├── build_pages()    ──► pages/**/*.html ──► Portfolio::compose
//!     │                        ──► minify ──► <output>/**/*.html
//!     │
//!     └── copy_assets()    ──► assets/** ──► <output>/assets/**
//! ```

use crate::{
    config::SiteConfig,
    loader::{Fetch, FsFetcher},
    log,
    site::Portfolio,
    utils::{log::ProgressBars, minify::minify_html},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use walkdir::WalkDir;

/// Files never treated as pages or assets.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Loaders for the site described by `config`.
///
/// `data/` and `components/` are mounted on the configured directories, so
/// loaders keep their logical paths wherever the files live.
pub fn portfolio_for(config: &SiteConfig) -> Portfolio<FsFetcher> {
    let fetcher = FsFetcher::new(config.get_root())
        .mount("data", &config.build.data)
        .mount("components", &config.build.components);
    Portfolio::new(Arc::new(fetcher))
}

/// Collect every regular file under `dir`, skipping [`IGNORED_FILES`].
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Page shells under `[build.pages]`.
pub fn collect_pages(config: &SiteConfig) -> Vec<PathBuf> {
    collect_all_files(&config.build.pages)
        .into_iter()
        .filter(|p| is_page(p))
        .collect()
}

pub fn is_page(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

/// Build the entire site.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site<F: Fetch>(config: &SiteConfig, site: &Portfolio<F>) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let pages = collect_pages(config);
    let assets = collect_all_files(&config.build.assets);

    log!("build"; "{} pages, {} assets", pages.len(), assets.len());
    let progress = ProgressBars::new(&[("pages", pages.len()), ("assets", assets.len())]);
    let has_error = AtomicBool::new(false);

    let (pages_result, assets_result) = rayon::join(
        || {
            run_all(&pages, &has_error, |path| {
                build_page(config, site, path)?;
                progress.inc_by_name("pages");
                Ok(())
            })
        },
        || {
            run_all(&assets, &has_error, |path| {
                copy_asset(config, path)?;
                progress.inc_by_name("assets");
                Ok(())
            })
        },
    );

    progress.finish();
    pages_result?;
    assets_result?;

    log_build_result(output)
}

/// Recompose `pages` without touching assets.
pub fn build_pages<F: Fetch>(
    config: &SiteConfig,
    site: &Portfolio<F>,
    pages: &[PathBuf],
) -> Result<()> {
    let has_error = AtomicBool::new(false);
    run_all(pages, &has_error, |path| build_page(config, site, path))
}

/// Compose one page shell and write it below the output directory.
pub fn build_page<F: Fetch>(config: &SiteConfig, site: &Portfolio<F>, shell: &Path) -> Result<()> {
    let relative = shell
        .strip_prefix(&config.build.pages)
        .with_context(|| format!("{} is outside the pages directory", shell.display()))?;

    let source = fs::read_to_string(shell)
        .with_context(|| format!("Failed to read page shell {}", shell.display()))?;
    let html = site.compose(config, &source, &url_path(relative));
    let html = minify_html(html.as_bytes(), config.build.minify);

    write_output(&config.build.output.join(relative), &html)
}

/// Copy one asset to `<output>/assets`, keeping its relative path.
pub fn copy_asset(config: &SiteConfig, path: &Path) -> Result<()> {
    let relative = path
        .strip_prefix(&config.build.assets)
        .with_context(|| format!("{} is outside the assets directory", path.display()))?;
    let dest = config.build.output.join("assets").join(relative);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(())
}

/// URL path a page is served at, e.g. `blog/index.html` → `/blog/index.html`.
fn url_path(relative: &Path) -> String {
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("/{}", segments.join("/"))
}

/// Run `job` over `paths` in parallel; the first failure is logged and
/// stops the remaining jobs.
fn run_all<J>(paths: &[PathBuf], has_error: &AtomicBool, job: J) -> Result<()>
where
    J: Fn(&Path) -> Result<()> + Sync,
{
    paths.par_iter().try_for_each(|path| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = job(path) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", path.display(), e);
            }
            return Err(anyhow!("Build failed"));
        }
        Ok(())
    })
}

fn write_output(dest: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, content).with_context(|| format!("Failed to write {}", dest.display()))
}

fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if pages has .html files");
    } else {
        log!("build"; "done");
    }

    Ok(())
}
