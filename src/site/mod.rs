//! Page composition.
//!
//! [`Portfolio::compose`] turns one page shell into a finished page:
//!
//! ```text
//! url path ──► PageKey
//!                │
//!   1. components ──► navbar/footer fragments into empty placeholders
//!   2. data       ──► always ∪ page requirements, loaded in parallel
//!   3. navigation ──► .nav-link[data-page=key] gets `active`
//!   4. sections   ──► page renderer + CTA/footer
//!   5. behavior   ──► runtime <script> before </body>
//!   6. reveal     ──► loading overlay removed
//! ```
//!
//! Steps 1-5 fail open: an error is logged with the page key and the page is
//! still revealed and returned.

pub mod behavior;
pub mod nav;
pub mod page;
mod sections;

pub use page::{Page, PageKey, data_plan};

use crate::{
    config::SiteConfig,
    loader::{ComponentLoader, ComponentSlot, DataLoader, Fetch},
    log,
    model::SiteData,
    render::fill_placeholders,
    utils::dom::{Document, DomResult},
};
use anyhow::{Context, Result};
use sections::Sections;
use std::{borrow::Cow, sync::Arc};

/// Data and component loaders shared by every page of a build.
pub struct Portfolio<F> {
    data: DataLoader<F>,
    components: ComponentLoader<F>,
}

impl<F: Fetch> Portfolio<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            data: DataLoader::new(Arc::clone(&fetcher)),
            components: ComponentLoader::new(fetcher),
        }
    }

    pub fn data(&self) -> &DataLoader<F> {
        &self.data
    }

    pub fn components(&self) -> &ComponentLoader<F> {
        &self.components
    }

    /// Compose the page shell served at `url_path`.
    pub fn compose(&self, config: &SiteConfig, shell: &str, url_path: &str) -> String {
        let page = PageKey::from_url_path(url_path);
        let mut doc = Document::new(shell);

        if let Err(err) = self.populate(config, &page, &mut doc) {
            log!("error"; "{page}: {err:#}");
        }

        if let Err(err) = doc.remove_element(&config.site.overlay)
            && !doc.strip_element(&config.site.overlay)
        {
            log!("error"; "{page}: overlay not removed: {err}");
        }
        doc.into_html()
    }

    fn populate(&self, config: &SiteConfig, page: &PageKey, doc: &mut Document) -> Result<()> {
        let slots =
            pending_slots(&config.components, doc).context("locating component slots")?;
        let loaded = self.components.load_components(&slots, doc);

        let plan = data_plan(page, &config.site.always, &config.pages);
        let bundle = self.data.load_multiple(&plan);
        let missing: Vec<_> = bundle.missing().collect();
        if !missing.is_empty() {
            log!("data"; "{page}: rendering without {}", missing.join(", "));
        }
        let data = SiteData::from_bundle(&bundle);

        let filled: Vec<&ComponentSlot> = slots
            .iter()
            .zip(loaded)
            .filter_map(|(slot, ok)| ok.then_some(slot))
            .collect();
        fill_slot_placeholders(doc, &filled, &data).context("filling component placeholders")?;

        nav::mark_active(doc, page).context("marking navigation")?;

        let coming_soon = config
            .site
            .coming_soon
            .as_deref()
            .unwrap_or(&data.content.coming_soon);
        let mut sections = Sections::new(doc, coming_soon);
        match Page::from_key(page) {
            Some(known) => sections.page(known, &data).context("rendering page")?,
            None => log!("warn"; "{page}: no renderer for this page"),
        }
        sections.shared(&data).context("rendering shared sections")?;

        behavior::install(doc, &config.behavior).context("installing runtime script")?;
        Ok(())
    }
}

/// Slots whose target is still empty. A target the shell already filled is
/// left as is.
fn pending_slots(slots: &[ComponentSlot], doc: &Document) -> DomResult<Vec<ComponentSlot>> {
    let mut pending = Vec::with_capacity(slots.len());
    for slot in slots {
        if !doc.has_content(&slot.target)? {
            pending.push(slot.clone());
        }
    }
    Ok(pending)
}

/// Substitute `{{key}}` in freshly injected fragments.
fn fill_slot_placeholders(
    doc: &mut Document,
    slots: &[&ComponentSlot],
    data: &SiteData,
) -> DomResult<()> {
    let values = data.placeholder_values();
    for slot in slots {
        let replaced = match doc.inner_html(&slot.target)? {
            Some(inner) => match fill_placeholders(inner, &values) {
                Cow::Owned(replaced) => replaced,
                Cow::Borrowed(_) => continue,
            },
            None => continue,
        };
        doc.set_inner_html(&slot.target, &replaced)?;
    }
    Ok(())
}
