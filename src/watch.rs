//! File system watcher for live rebuilds.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► handle_changes()
//!                                            │
//!   folio.toml       ──► reload config, fresh loaders, full build
//!   data/*.json      ──► drop that document from the cache ─┐
//!   components/*.html──► drop that fragment from the cache ─┴► all pages
//!   pages/**/*.html  ──► those pages
//!   assets/**        ──► those assets
//! ```

use crate::{
    build::{self, build_pages, build_site, collect_pages, copy_asset, portfolio_for},
    config::{SiteConfig, cfg, reload_config},
    loader::FsFetcher,
    log,
    site::Portfolio,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// What a changed path means for the build.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Change {
    Config,
    Data(String),
    Component(String),
    Page(PathBuf),
    Asset(PathBuf),
    Unknown,
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

fn stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
}

fn categorize(path: &Path, config: &SiteConfig) -> Change {
    let build = &config.build;
    let ext = path.extension().and_then(|e| e.to_str());

    if path == config.config_path {
        return Change::Config;
    }
    if path.starts_with(&build.data) && ext == Some("json") {
        return stem(path).map_or(Change::Unknown, Change::Data);
    }
    if path.starts_with(&build.components) && ext == Some("html") {
        return stem(path).map_or(Change::Unknown, Change::Component);
    }
    if path.starts_with(&build.pages) && build::is_page(path) {
        return Change::Page(path.to_path_buf());
    }
    if path.starts_with(&build.assets) {
        return Change::Asset(path.to_path_buf());
    }
    Change::Unknown
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.pending
            .extend(paths.into_iter().filter(|p| !is_temp_file(p)));
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Changes sorted by how much of the site they invalidate.
#[derive(Debug, Default)]
struct Plan {
    config: bool,
    data: Vec<String>,
    components: Vec<String>,
    pages: Vec<PathBuf>,
    assets: Vec<PathBuf>,
}

impl Plan {
    fn new(paths: &[PathBuf], config: &SiteConfig) -> Self {
        let mut plan = Self::default();
        for path in paths {
            match categorize(path, config) {
                Change::Config => plan.config = true,
                Change::Data(name) => plan.data.push(name),
                Change::Component(name) => plan.components.push(name),
                Change::Page(path) => plan.pages.push(path),
                Change::Asset(path) => plan.assets.push(path),
                Change::Unknown => {}
            }
        }
        plan
    }

    /// Drop stale cache entries. Returns `true` when every page must be
    /// recomposed.
    fn invalidate(&self, site: &Portfolio<FsFetcher>) -> bool {
        for name in &self.data {
            site.data().clear_cache(Some(name));
        }
        for name in &self.components {
            site.components().clear_cache(Some(name));
        }
        !self.data.is_empty() || !self.components.is_empty()
    }
}

/// Process file changes. Returns true if a rebuild ran (for cooldown).
fn handle_changes(paths: &[PathBuf], site: &mut Portfolio<FsFetcher>) -> bool {
    let plan = Plan::new(paths, &cfg());

    if plan.config {
        match reload_config() {
            Ok(true) => {
                let config = cfg();
                *site = portfolio_for(&config);
                log!("watch"; "config changed, rebuilding...");
                return report(build_site(&config, site), "full");
            }
            Ok(false) => {}
            Err(e) => {
                log!("watch"; "config not reloaded: {e:#}");
                return false;
            }
        }
    }

    let config = cfg();
    let mut rebuilt = false;

    if plan.invalidate(site) {
        let changed: Vec<_> = plan.data.iter().chain(&plan.components).cloned().collect();
        log!("watch"; "{} changed, rebuilding pages...", changed.join(", "));
        rebuilt |= report(build_pages(&config, site, &collect_pages(&config)), "pages");
    } else {
        let pages: Vec<_> = plan.pages.into_iter().filter(|p| p.exists()).collect();
        if !pages.is_empty() {
            log!("watch"; "{}", rel_list(&pages, &config.build.pages));
            rebuilt |= report(build_pages(&config, site, &pages), "pages");
        }
    }

    let assets: Vec<_> = plan.assets.into_iter().filter(|p| p.is_file()).collect();
    if !assets.is_empty() {
        log!("watch"; "{}", rel_list(&assets, &config.build.assets));
        let result = assets
            .iter()
            .try_for_each(|path| copy_asset(&config, path));
        rebuilt |= report(result, "assets");
    }

    rebuilt
}

fn rel_list(paths: &[PathBuf], root: &Path) -> String {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn report(result: Result<()>, kind: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log!("watch"; "{kind} build failed");
            log!("watch"; "{e:#}");
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let build = &config.build;
    let dirs = [
        &build.data,
        &build.components,
        &build.pages,
        &build.assets,
    ];

    for dir in dirs.into_iter().filter(|d| d.is_dir()) {
        watcher
            .watch(dir, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
    }
    if config.config_path.is_file() {
        watcher
            .watch(&config.config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", config.config_path.display()))?;
    }

    let root = config.get_root();
    let watched: Vec<_> = dirs
        .iter()
        .filter(|d| d.is_dir())
        .map(|d| format!("{}/", d.strip_prefix(root).unwrap_or(d).display()))
        .collect();
    log!("watch"; "{}", watched.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut site = portfolio_for(&config);
    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event.paths);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut site) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        let root = Path::new("/site");
        config.set_root(root);
        config.config_path = root.join("folio.toml");
        config.build.data = root.join("data");
        config.build.components = root.join("components");
        config.build.pages = root.join("pages");
        config.build.assets = root.join("assets");
        config
    }

    #[test]
    fn test_categorize() {
        let config = config();
        let cases = [
            ("/site/folio.toml", Change::Config),
            ("/site/data/projects.json", Change::Data("projects".into())),
            ("/site/data/notes.txt", Change::Unknown),
            (
                "/site/components/navbar.html",
                Change::Component("navbar".into()),
            ),
            (
                "/site/pages/blog/index.html",
                Change::Page("/site/pages/blog/index.html".into()),
            ),
            (
                "/site/assets/css/site.css",
                Change::Asset("/site/assets/css/site.css".into()),
            ),
            ("/site/README.md", Change::Unknown),
        ];
        for (path, expected) in cases {
            assert_eq!(categorize(Path::new(path), &config), expected, "{path}");
        }
    }

    #[test]
    fn test_plan_groups_changes() {
        let paths: Vec<PathBuf> = [
            "/site/data/news.json",
            "/site/components/footer.html",
            "/site/pages/about.html",
            "/site/assets/me.png",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();

        let plan = Plan::new(&paths, &config());

        assert!(!plan.config);
        assert_eq!(plan.data, ["news"]);
        assert_eq!(plan.components, ["footer"]);
        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.assets.len(), 1);
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("/site/data/.projects.json.swp")));
        assert!(is_temp_file(Path::new("/site/pages/about.html~")));
        assert!(is_temp_file(Path::new("/site/data/x.tmp")));
        assert!(!is_temp_file(Path::new("/site/data/projects.json")));
    }

    #[test]
    fn test_debouncer() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));

        debouncer.add([
            PathBuf::from("/site/data/a.json"),
            PathBuf::from("/site/data/a.json"),
            PathBuf::from("/site/data/.a.json.swp"),
        ]);
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_millis(DEBOUNCE_MS));

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 20));
        assert!(debouncer.ready());
        assert_eq!(debouncer.take(), [PathBuf::from("/site/data/a.json")]);

        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }
}
