//! Resource fetching relative to the site root.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Why a resource could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("`{0}` not found")]
    NotFound(String),

    #[error("failed to read `{0}`")]
    Io(String, #[source] io::Error),
}

/// Source of site resources, addressed by a `/`-separated relative path
/// such as `data/personal.json`.
pub trait Fetch: Send + Sync {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reads resources from a directory on disk.
///
/// The first path segment can be mounted elsewhere, so `data/x.json` may
/// resolve to `<root>/content/x.json` when `data` is mounted on `content`.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
    mounts: Vec<(String, PathBuf)>,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mounts: Vec::new(),
        }
    }

    /// Resolve paths under `prefix/` inside `dir` instead of `<root>/prefix`.
    pub fn mount(mut self, prefix: &str, dir: impl Into<PathBuf>) -> Self {
        self.mounts.push((prefix.to_owned(), dir.into()));
        self
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = path.trim_start_matches('/');
        if let Some((prefix, rest)) = path.split_once('/')
            && let Some((_, dir)) = self.mounts.iter().find(|(p, _)| p == prefix)
        {
            return dir.join(rest);
        }
        self.root.join(path)
    }
}

impl Fetch for FsFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        std::fs::read(self.resolve(path)).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(path.to_owned()),
            _ => FetchError::Io(path.to_owned(), err),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_fetcher_reads_relative_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/personal.json"), "{}").unwrap();

        let fetcher = FsFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("data/personal.json").unwrap(), b"{}");
        assert_eq!(fetcher.fetch("/data/personal.json").unwrap(), b"{}");
    }

    #[test]
    fn test_fs_fetcher_mounts() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("content")).unwrap();
        std::fs::write(dir.path().join("content/news.json"), "[]").unwrap();

        let fetcher = FsFetcher::new(dir.path()).mount("data", dir.path().join("content"));
        assert_eq!(fetcher.fetch("data/news.json").unwrap(), b"[]");
        assert!(matches!(
            fetcher.fetch("components/navbar.html"),
            Err(FetchError::NotFound(_))
        ));
    }

    #[test]
    fn test_fs_fetcher_not_found() {
        let dir = TempDir::new().unwrap();
        let fetcher = FsFetcher::new(dir.path());
        let err = fetcher.fetch("data/missing.json").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref p) if p == "data/missing.json"));
        assert!(err.to_string().contains("not found"));
    }
}
