//! Navigation state baked into the page.

use super::page::PageKey;
use crate::utils::dom::{Document, DomResult};

/// Mark every `.nav-link` whose `data-page` is `page` as `active`.
pub fn mark_active(doc: &mut Document, page: &PageKey) -> DomResult<usize> {
    doc.add_class_where("active", |el| {
        el.has_class("nav-link") && el.attr("data-page") == Some(page.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: &str = r#"<nav><a class="nav-link" data-page="index" href="index.html">Home</a><a class="nav-link" data-page="about" href="about.html">About</a><a class="brand" data-page="about">Me</a></nav>"#;

    #[test]
    fn test_mark_active_only_matching_links() {
        let mut doc = Document::new(NAV);
        let changed = mark_active(&mut doc, &PageKey::from_url_path("/about.html")).unwrap();

        assert_eq!(changed, 1);
        assert!(doc.as_str().contains(r#"class="nav-link active" data-page="about""#));
        assert!(doc.as_str().contains(r#"class="nav-link" data-page="index""#));
        assert!(doc.as_str().contains(r#"class="brand""#));
    }

    #[test]
    fn test_mark_active_root_is_index() {
        let mut doc = Document::new(NAV);
        mark_active(&mut doc, &PageKey::from_url_path("/")).unwrap();
        assert!(doc.as_str().contains(r#"class="nav-link active" data-page="index""#));
    }

    #[test]
    fn test_mark_active_unknown_page_changes_nothing() {
        let mut doc = Document::new(NAV);
        let changed = mark_active(&mut doc, &PageKey::from_url_path("/blog.html")).unwrap();
        assert_eq!(changed, 0);
        assert_eq!(doc.as_str(), NAV);
    }
}
