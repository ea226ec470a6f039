//! HTML fragment loading and injection.
//!
//! A component is `components/{name}.html`, spliced verbatim into a target
//! element of the page being composed. Any `<script>` inside the fragment
//! becomes part of the static output and runs once when the browser parses
//! the finished page.

use super::fetch::Fetch;
use crate::{log, utils::dom::Document};
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A component and the id of the element it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentSlot {
    pub name: String,
    pub target: String,
}

impl ComponentSlot {
    pub fn new(name: &str, target: &str) -> Self {
        Self {
            name: name.to_owned(),
            target: target.to_owned(),
        }
    }
}

pub struct ComponentLoader<F> {
    fetcher: Arc<F>,
    components: RwLock<FxHashMap<String, Arc<str>>>,
}

impl<F: Fetch> ComponentLoader<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            components: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn path_of(name: &str) -> String {
        format!("components/{name}.html")
    }

    /// Fragment text, from the registry or freshly fetched.
    pub fn fetch_component(&self, name: &str) -> Option<Arc<str>> {
        if let Some(html) = self.get_component(name) {
            return Some(html);
        }

        let path = Self::path_of(name);
        match self.fetcher.fetch(&path) {
            Ok(bytes) => {
                let html: Arc<str> = String::from_utf8_lossy(&bytes).into();
                self.components
                    .write()
                    .insert(name.to_owned(), Arc::clone(&html));
                Some(html)
            }
            Err(err) => {
                log!("component"; "{name}: {err}");
                None
            }
        }
    }

    /// Inject one component into `target_id`. `true` only if it landed.
    #[allow(dead_code)] // Reserved API
    pub fn load_component(&self, name: &str, target_id: &str, doc: &mut Document) -> bool {
        let Some(html) = self.fetch_component(name) else {
            return false;
        };
        inject(name, &html, target_id, doc)
    }

    /// Fetch all slots in parallel, then inject in slot order.
    pub fn load_components(&self, slots: &[ComponentSlot], doc: &mut Document) -> Vec<bool> {
        let fetched: Vec<Option<Arc<str>>> = slots
            .par_iter()
            .map(|slot| self.fetch_component(&slot.name))
            .collect();

        slots
            .iter()
            .zip(fetched)
            .map(|(slot, html)| {
                html.is_some_and(|html| inject(&slot.name, &html, &slot.target, doc))
            })
            .collect()
    }

    pub fn get_component(&self, name: &str) -> Option<Arc<str>> {
        self.components.read().get(name).cloned()
    }

    /// Drop one fragment from the registry, or all of them with `None`.
    pub fn clear_cache(&self, name: Option<&str>) {
        let mut components = self.components.write();
        match name {
            Some(name) => {
                components.remove(name);
            }
            None => components.clear(),
        }
    }
}

fn inject(name: &str, html: &str, target_id: &str, doc: &mut Document) -> bool {
    match doc.set_inner_html(target_id, html) {
        Ok(true) => true,
        Ok(false) => {
            log!("component"; "{name}: target #{target_id} not found");
            false
        }
        Err(err) => {
            log!("component"; "{name}: {err}");
            false
        }
    }
}
