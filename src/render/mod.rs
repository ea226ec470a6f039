//! Record → HTML rendering.
//!
//! Every renderer is a pure function over typed records. Field text is
//! interpolated as-is: data files are author-owned and may carry inline
//! markup. An empty input always renders to `""`.
//!
//! - [`cards`]: project, course and certification grids plus the home-page
//!   featured cards
//! - [`timeline`]: education, work and news timelines
//! - [`profile`]: hero, stats, languages, interests, contacts, CTA

pub mod cards;
pub mod profile;
pub mod timeline;

pub use cards::{
    issuer_initials, render_certifications, render_courses, render_featured_certifications,
    render_featured_courses, render_featured_education, render_featured_projects,
    render_featured_work, render_projects,
};
pub use profile::{
    render_contact_cards, render_cta, render_hero, render_interests, render_languages,
    render_stats,
};
pub use timeline::{render_education_timeline, render_news, render_work_timeline};

use regex::{Captures, Regex};
use serde_json::Value;
use std::{borrow::Cow, fmt::Write, sync::LazyLock};

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap());

/// Replace `{{key}}` with `values[key]`.
///
/// Unknown keys are left untouched. Strings are inserted raw, other scalars
/// through their JSON form; `null`, arrays and objects count as unknown.
pub fn fill_placeholders<'a>(template: &'a str, values: &Value) -> Cow<'a, str> {
    RE_PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let whole = &caps[0];
        match values.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
            _ => whole.to_owned(),
        }
    })
}

/// `<div class="tags">…</div>` for a tag list. Empty list, empty string.
pub(crate) fn tags(out: &mut String, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    out.push_str(r#"<div class="tags">"#);
    for tag in tags {
        let _ = write!(out, r#"<span class="tag">{tag}</span>"#);
    }
    out.push_str("</div>");
}

/// Render each item with `f` into one buffer.
pub(crate) fn render_each<T>(items: &[T], f: impl Fn(&mut String, &T)) -> String {
    let mut out = String::with_capacity(items.len() * 512);
    for item in items {
        f(&mut out, item);
    }
    out
}
