//! Client-side behavior shipped with every page.
//!
//! Menu toggle, scroll shadow, smooth scrolling, reveal-on-scroll and skill
//! bars need a live browser, so they are emitted as one inline script built
//! from `embed/runtime.js` with the `[behavior]` settings filled in.

use crate::{
    config::{BehaviorConfig, defaults},
    render::fill_placeholders,
    utils::dom::{Document, DomResult},
};
use serde_json::json;

const RUNTIME_TEMPLATE: &str = include_str!("../embed/runtime.js");

/// Id of the injected `<script>`; a page carrying it is left alone.
pub const RUNTIME_ID: &str = "folio-runtime";

/// The runtime script for `behavior`, or `None` when everything is off.
pub fn runtime_script(behavior: &BehaviorConfig) -> Option<String> {
    let enabled = behavior.menu_toggle
        || behavior.scroll_shadow
        || behavior.reveal
        || behavior.skill_bars
        || behavior.smooth_scroll;
    if !enabled {
        return None;
    }

    let selectors = if behavior.reveal_selectors.is_empty() {
        defaults::behavior::reveal_selectors()
    } else {
        behavior.reveal_selectors.clone()
    };
    let values = json!({
        "menuToggle": behavior.menu_toggle,
        "scrollShadow": behavior.scroll_shadow,
        "scrollThreshold": behavior.scroll_threshold,
        "reveal": behavior.reveal,
        // JSON string literal doubles as a JS string literal
        "revealSelectors": json!(selectors.join(", ")).to_string(),
        "skillBars": behavior.skill_bars,
        "skillBarDelay": behavior.skill_bar_delay,
        "smoothScroll": behavior.smooth_scroll,
    });

    Some(format!(
        "<script id=\"{RUNTIME_ID}\">\n{}</script>\n",
        fill_placeholders(RUNTIME_TEMPLATE, &values)
    ))
}

/// Append the runtime script before `</body>`. Returns `false` when nothing
/// was added.
pub fn install(doc: &mut Document, behavior: &BehaviorConfig) -> DomResult<bool> {
    if doc.contains_id(RUNTIME_ID)? {
        return Ok(false);
    }
    match runtime_script(behavior) {
        Some(script) => doc.append_to_body(&script).map(|()| true),
        None => Ok(false),
    }
}
