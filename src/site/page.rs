//! Page identification and per-page data requirements.

use rustc_hash::FxHashMap;
use std::fmt;

/// Identifier of a page, derived from its URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey(String);

impl PageKey {
    /// Last path segment without query, fragment or extension.
    ///
    /// `/about.html` → `about`, `/` → `index`.
    pub fn from_url_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path.rsplit('/').next().unwrap_or_default();
        let stem = segment
            .rsplit_once('.')
            .map_or(segment, |(stem, _)| stem);

        if stem.is_empty() {
            Self("index".to_owned())
        } else {
            Self(stem.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pages with a dedicated renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    About,
    Projects,
    Courses,
    Journey,
    News,
    Contact,
}

impl Page {
    pub fn from_key(key: &PageKey) -> Option<Self> {
        Some(match key.as_str() {
            "index" => Self::Index,
            "about" => Self::About,
            "projects" => Self::Projects,
            "courses" => Self::Courses,
            "journey" => Self::Journey,
            "news" => Self::News,
            "contact" => Self::Contact,
            _ => return None,
        })
    }

    /// Data documents the page renders, beyond the always-loaded set.
    pub const fn requirements(self) -> &'static [&'static str] {
        match self {
            Self::Index => &[
                "projects",
                "courses",
                "certifications",
                "education",
                "work",
                "news",
            ],
            Self::About => &["about"],
            Self::Projects => &["projects"],
            Self::Courses => &["courses", "certifications"],
            Self::Journey => &["education", "work"],
            Self::News => &["news"],
            Self::Contact => &[],
        }
    }
}

/// Documents to load for `page`: `always` followed by the page's own
/// requirements, without duplicates, in first-seen order.
///
/// `overrides` (the `[pages]` table) replaces the built-in requirements of a
/// key, and adds requirements for keys without a renderer.
pub fn data_plan(
    page: &PageKey,
    always: &[String],
    overrides: &FxHashMap<String, Vec<String>>,
) -> Vec<String> {
    let mapped: Vec<&str> = match overrides.get(page.as_str()) {
        Some(names) => names.iter().map(String::as_str).collect(),
        None => Page::from_key(page).map_or_else(Vec::new, |p| p.requirements().to_vec()),
    };

    let mut plan: Vec<String> = Vec::with_capacity(always.len() + mapped.len());
    for name in always.iter().map(String::as_str).chain(mapped) {
        if !plan.iter().any(|existing| existing == name) {
            plan.push(name.to_owned());
        }
    }
    plan
}
