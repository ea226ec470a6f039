//! Lenient HTML element index for page shells.
//!
//! Page shells are hand-written HTML, not XML: void elements are left open,
//! attributes may be bare and scripts contain `<`. [`Document`] tokenizes with
//! `quick-xml` with all well-formedness checks disabled, records the byte span
//! of every element, and performs edits by splicing the source string. The
//! original formatting outside edited regions is preserved byte for byte.
//!
//! ```text
//! <div id="stats-grid" class="grid">   ...   </div>
//! ^start                           ^open_end ^close_start ^end
//! ```
//!
//! `script`, `style`, `textarea` and `title` are raw-text elements: their body
//! is skipped opaquely up to the matching close tag.

use quick_xml::{
    Reader,
    escape::escape,
    events::{BytesStart, Event},
};
use regex::Regex;
use thiserror::Error;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose body is raw text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Markup that could not be tokenized.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("malformed markup near byte {position}")]
    Parse {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
}

pub type DomResult<T> = Result<T, DomError>;

// ============================================================================
// Element
// ============================================================================

/// Byte span and attributes of one element in a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    start: usize,
    open_end: usize,
    close_start: usize,
    end: usize,
    self_closing: bool,
}

impl Element {
    /// Attribute value by (lowercase) name. Bare attributes yield `""`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Render the opening tag from the current attribute list.
    ///
    /// Values keep their source entities; only `"` needs escaping, since a
    /// raw value can only hold one if it was single-quoted.
    fn open_tag(&self) -> String {
        let mut tag = format!("<{}", self.name);
        for (key, value) in &self.attrs {
            tag.push(' ');
            tag.push_str(key);
            if !value.is_empty() {
                tag.push_str("=\"");
                tag.push_str(&value.replace('"', "&quot;"));
                tag.push('"');
            }
        }
        tag.push_str(if self.self_closing { " />" } else { ">" });
        tag
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => self.attrs.push((name.to_owned(), value.to_owned())),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A page shell being composed.
///
/// Every query rescans the source; shells are small and edits are few, so
/// spans never go stale.
#[derive(Debug, Clone, Default)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// All elements in document order.
    pub fn elements(&self) -> DomResult<Vec<Element>> {
        scan(&self.html)
    }

    pub fn find_by_id(&self, id: &str) -> DomResult<Option<Element>> {
        Ok(self.elements()?.into_iter().find(|el| el.id() == Some(id)))
    }

    pub fn contains_id(&self, id: &str) -> DomResult<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Content between the element's tags, if the element exists.
    pub fn inner_html(&self, id: &str) -> DomResult<Option<&str>> {
        Ok(self
            .find_by_id(id)?
            .map(|el| &self.html[el.open_end..el.close_start]))
    }

    /// Whether the element exists and holds anything besides whitespace.
    pub fn has_content(&self, id: &str) -> DomResult<bool> {
        Ok(self
            .inner_html(id)?
            .is_some_and(|inner| !inner.trim().is_empty()))
    }

    /// Replace the element's content. Returns `false` if the id is absent.
    pub fn set_inner_html(&mut self, id: &str, html: &str) -> DomResult<bool> {
        let Some(el) = self.find_by_id(id)? else {
            return Ok(false);
        };
        if el.open_end == el.close_start && el.close_start == el.end {
            // Void or self-closing: nowhere to put content
            return Ok(false);
        }
        self.html.replace_range(el.open_end..el.close_start, html);
        Ok(true)
    }

    /// Replace the element's content with escaped text.
    pub fn set_text(&mut self, id: &str, text: &str) -> DomResult<bool> {
        self.set_inner_html(id, &escape(text))
    }

    /// Set (or add) one attribute on the element with `id`.
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> DomResult<bool> {
        let Some(mut el) = self.find_by_id(id)? else {
            return Ok(false);
        };
        el.set_attr(name, value);
        self.html.replace_range(el.start..el.open_end, &el.open_tag());
        Ok(true)
    }

    /// Add `class` to every element selected by `select`. Returns how many
    /// elements changed; elements already carrying the class are left alone.
    pub fn add_class_where(
        &mut self,
        class: &str,
        select: impl Fn(&Element) -> bool,
    ) -> DomResult<usize> {
        let mut targets: Vec<Element> = self
            .elements()?
            .into_iter()
            .filter(|el| select(el) && !el.has_class(class))
            .collect();

        // Opening tags never overlap; splice back to front so offsets hold
        targets.sort_by(|a, b| b.start.cmp(&a.start));
        for el in &mut targets {
            let classes = match el.attr("class") {
                Some(existing) if !existing.trim().is_empty() => {
                    format!("{} {class}", existing.trim())
                }
                _ => class.to_owned(),
            };
            el.set_attr("class", &classes);
            self.html.replace_range(el.start..el.open_end, &el.open_tag());
        }
        Ok(targets.len())
    }

    /// Remove the element and everything inside it.
    pub fn remove_element(&mut self, id: &str) -> DomResult<bool> {
        let Some(el) = self.find_by_id(id)? else {
            return Ok(false);
        };
        self.html.replace_range(el.start..el.end, "");
        Ok(true)
    }

    /// Remove the element by locating its `id` attribute in the raw text.
    ///
    /// Works on markup [`Self::remove_element`] cannot scan. Nested elements
    /// of the same name are counted; without a closing tag only the opening
    /// tag goes.
    pub fn strip_element(&mut self, id: &str) -> bool {
        match text_span(&self.html, id) {
            Some((start, end)) => {
                self.html.replace_range(start..end, "");
                true
            }
            None => false,
        }
    }

    /// Insert markup right before `</body>`, or at the end without a body.
    pub fn append_to_body(&mut self, html: &str) -> DomResult<()> {
        let at = self
            .elements()?
            .into_iter()
            .find(|el| el.name == "body" && el.close_start < el.end)
            .map_or(self.html.len(), |body| body.close_start);
        self.html.insert_str(at, html);
        Ok(())
    }
}

// ============================================================================
// Scanner
// ============================================================================

fn html_reader(src: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader.config_mut().allow_unmatched_ends = true;
    reader
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn read_attrs(elem: &BytesStart<'_>) -> Vec<(String, String)> {
    elem.html_attributes()
        .flatten()
        .map(|attr| {
            (
                tag_name(attr.key.as_ref()),
                String::from_utf8_lossy(&attr.value).into_owned(),
            )
        })
        .collect()
}

/// Case-insensitive search for `needle` in `haystack[from..]`.
fn find_ci(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes().get(from..)?;
    bytes
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
        .map(|pos| from + pos)
}

/// Position of `tag` (`<div`, `</div`) at or after `from`, skipping longer
/// names that share the prefix.
fn find_tag(src: &str, from: usize, tag: &str) -> Option<usize> {
    let mut pos = from;
    loop {
        let at = find_ci(src, pos, tag)?;
        match src.as_bytes().get(at + tag.len()) {
            Some(b) if b.is_ascii_alphanumeric() || *b == b'-' => pos = at + 1,
            _ => return Some(at),
        }
    }
}

/// Span of the element carrying `id`, found by text search alone.
fn text_span(src: &str, id: &str) -> Option<(usize, usize)> {
    let pattern = format!(
        r#"(?i-u:\sid)(?-u:\s*=\s*)(?:"{0}"|'{0}'|{0}(?-u:[\s/>]))"#,
        regex::escape(id)
    );
    let found = Regex::new(&pattern).ok()?.find(src)?;
    let start = src[..found.start()].rfind('<')?;
    let name: String = src[start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    let open_end = found.start() + src[found.start()..].find('>')? + 1;
    if VOID_ELEMENTS.contains(&name.as_str()) || src[..open_end].ends_with("/>") {
        return Some((start, open_end));
    }

    let (open_tag, close_tag) = (format!("<{name}"), format!("</{name}"));
    let mut depth = 1usize;
    let mut pos = open_end;
    while depth > 0 {
        let Some(close) = find_tag(src, pos, &close_tag) else {
            return Some((start, open_end));
        };
        match find_tag(src, pos, &open_tag) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + open_tag.len();
            }
            _ => {
                depth -= 1;
                pos = close + close_tag.len();
            }
        }
    }
    let end = src[pos..].find('>').map_or(src.len(), |i| pos + i + 1);
    Some((start, end))
}

fn scan(src: &str) -> DomResult<Vec<Element>> {
    let mut elements: Vec<Element> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut base = 0usize;
    let mut reader = html_reader(src);

    loop {
        let before = base + reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|source| DomError::Parse {
            position: base + reader.error_position() as usize,
            source,
        })?;
        let after = base + reader.buffer_position() as usize;

        match event {
            Event::Start(elem) => {
                let name = tag_name(elem.name().as_ref());
                let mut el = Element {
                    attrs: read_attrs(&elem),
                    start: before,
                    open_end: after,
                    close_start: after,
                    end: after,
                    self_closing: false,
                    name,
                };

                if VOID_ELEMENTS.contains(&el.name.as_str()) {
                    elements.push(el);
                } else if RAW_TEXT_ELEMENTS.contains(&el.name.as_str()) {
                    let closing = format!("</{}", el.name);
                    let close_start = find_ci(src, after, &closing).unwrap_or(src.len());
                    let end = src[close_start..]
                        .find('>')
                        .map_or(src.len(), |gt| close_start + gt + 1);
                    el.close_start = close_start;
                    el.end = end;
                    elements.push(el);

                    // Resume tokenizing after the raw body
                    base = end;
                    reader = html_reader(&src[end..]);
                } else {
                    open.push(elements.len());
                    elements.push(el);
                }
            }
            Event::Empty(elem) => elements.push(Element {
                name: tag_name(elem.name().as_ref()),
                attrs: read_attrs(&elem),
                start: before,
                open_end: after,
                close_start: after,
                end: after,
                self_closing: true,
            }),
            Event::End(elem) => {
                let name = tag_name(elem.name().as_ref());
                // Unmatched end tags are ignored; unclosed children close here
                if let Some(depth) = open.iter().rposition(|&i| elements[i].name == name) {
                    for &index in &open[depth + 1..] {
                        elements[index].close_start = before;
                        elements[index].end = before;
                    }
                    let index = open[depth];
                    elements[index].close_start = before;
                    elements[index].end = after;
                    open.truncate(depth);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    for index in open {
        elements[index].close_start = src.len();
        elements[index].end = src.len();
    }
    Ok(elements)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Home</title>
    <script>if (a < b && c > d) { go(); }</script>
</head>
<body>
    <div id="loading-overlay" class="loader"><span></span></div>
    <nav><a class="nav-link" data-page="index" href="index.html">Home</a><a class="nav-link" data-page="about" href="about.html">About</a></nav>
    <section id="stats-grid"></section>
    <div id="footer-placeholder">
    </div>
    <p>© <span id="footer-year">2020</span></p>
    <a id="footer-email" href="#" download>Mail</a>
</body>
</html>"##;

    #[test]
    fn test_find_by_id_skips_script_bodies() {
        let doc = Document::new(SHELL);
        let stats = doc.find_by_id("stats-grid").unwrap().unwrap();
        assert_eq!(stats.name, "section");
        assert!(doc.contains_id("footer-year").unwrap());
        assert!(!doc.contains_id("missing").unwrap());
    }

    #[test]
    fn test_void_elements_do_not_swallow_siblings() {
        let doc = Document::new(SHELL);
        let elements = doc.elements().unwrap();
        let meta = elements.iter().find(|el| el.name == "meta").unwrap();
        assert_eq!(meta.attr("charset"), Some("UTF-8"));
        // <title> still closes on its own tag after the open <meta>
        let title = elements.iter().find(|el| el.name == "title").unwrap();
        assert_eq!(&SHELL[title.open_end..title.close_start], "Home");
    }

    #[test]
    fn test_set_inner_html() {
        let mut doc = Document::new(SHELL);
        assert!(doc.set_inner_html("stats-grid", "<b>42</b>").unwrap());
        assert!(doc.as_str().contains(r#"<section id="stats-grid"><b>42</b></section>"#));
        assert!(!doc.set_inner_html("missing", "x").unwrap());
    }

    #[test]
    fn test_has_content() {
        let doc = Document::new(SHELL);
        assert!(!doc.has_content("footer-placeholder").unwrap());
        assert!(doc.has_content("footer-year").unwrap());
        assert!(!doc.has_content("missing").unwrap());
    }

    #[test]
    fn test_set_text_escapes() {
        let mut doc = Document::new(SHELL);
        doc.set_text("footer-year", "<2025>").unwrap();
        assert!(doc.as_str().contains("&lt;2025&gt;"));
    }

    #[test]
    fn test_set_attribute_replaces_and_keeps_bare_attrs() {
        let mut doc = Document::new(SHELL);
        assert!(doc.set_attribute("footer-email", "href", "mailto:me@example.com").unwrap());
        assert!(doc.as_str().contains(
            r#"<a id="footer-email" href="mailto:me@example.com" download>Mail</a>"#
        ));
    }

    #[test]
    fn test_add_class_where() {
        let mut doc = Document::new(SHELL);
        let changed = doc
            .add_class_where("active", |el| {
                el.has_class("nav-link") && el.attr("data-page") == Some("about")
            })
            .unwrap();
        assert_eq!(changed, 1);
        assert!(doc.as_str().contains(r#"class="nav-link active" data-page="about""#));
        assert!(doc.as_str().contains(r#"class="nav-link" data-page="index""#));

        // Idempotent
        let again = doc
            .add_class_where("active", |el| el.attr("data-page") == Some("about"))
            .unwrap();
        assert_eq!(again, 0);
    }

    #[test]
    fn test_remove_element() {
        let mut doc = Document::new(SHELL);
        assert!(doc.remove_element("loading-overlay").unwrap());
        assert!(!doc.as_str().contains("loader"));
        assert!(!doc.remove_element("loading-overlay").unwrap());
    }

    #[test]
    fn test_strip_element_without_scanning() {
        let mut doc = Document::new(
            r#"<body><div id="loading-overlay"><div class="spin"></div></div><p>kept</p><!-- open"#,
        );
        assert!(doc.elements().is_err());
        assert!(doc.strip_element("loading-overlay"));
        assert_eq!(doc.as_str(), "<body><p>kept</p><!-- open");
        assert!(!doc.strip_element("loading-overlay"));
    }

    #[test]
    fn test_strip_element_quote_styles() {
        let mut single = Document::new("<DIV class=x id='ov'>a</DIV><divider></divider>b");
        assert!(single.strip_element("ov"));
        assert_eq!(single.as_str(), "<divider></divider>b");

        let mut bare = Document::new("<p>a</p><img id=ov src=x.png>b");
        assert!(bare.strip_element("ov"));
        assert_eq!(bare.as_str(), "<p>a</p>b");

        let mut unclosed = Document::new(r#"<section id="ov"><i>a</i>"#);
        assert!(unclosed.strip_element("ov"));
        assert_eq!(unclosed.as_str(), "<i>a</i>");

        let mut other = Document::new(r#"<div data-id="ov" id="ovx"></div>"#);
        assert!(!other.strip_element("ov"));
    }

    #[test]
    fn test_rewritten_tag_escapes_double_quotes() {
        let mut doc = Document::new(
            r#"<nav><a class="nav-link" data-page="about" onclick='track("nav")'>About</a></nav>"#,
        );
        doc.add_class_where("active", |el| el.attr("data-page") == Some("about"))
            .unwrap();
        assert_eq!(
            doc.as_str(),
            r#"<nav><a class="nav-link active" data-page="about" onclick="track(&quot;nav&quot;)">About</a></nav>"#
        );
        let link = doc.elements().unwrap().into_iter().find(|el| el.name == "a").unwrap();
        assert_eq!(link.attr("onclick"), Some("track(&quot;nav&quot;)"));
    }

    #[test]
    fn test_append_to_body() {
        let mut doc = Document::new(SHELL);
        doc.append_to_body("<script>run()</script>").unwrap();
        assert!(doc.as_str().contains("<script>run()</script></body>"));

        let mut bare = Document::new("<p>hi</p>");
        bare.append_to_body("<i>x</i>").unwrap();
        assert_eq!(bare.as_str(), "<p>hi</p><i>x</i>");
    }

    #[test]
    fn test_unclosed_children_close_at_parent_end() {
        let doc = Document::new(r#"<ul id="list"><li>one<li>two</ul><p id="after">x</p>"#);
        assert_eq!(doc.inner_html("list").unwrap(), Some("<li>one<li>two"));
        assert_eq!(doc.inner_html("after").unwrap(), Some("x"));
    }

    #[test]
    fn test_nested_same_name_elements() {
        let doc = Document::new(r#"<div id="outer"><div id="inner">a</div>b</div>"#);
        assert_eq!(doc.inner_html("outer").unwrap(), Some(r#"<div id="inner">a</div>b"#));
        assert_eq!(doc.inner_html("inner").unwrap(), Some("a"));
    }

    #[test]
    fn test_uppercase_script_close() {
        let doc = Document::new(r#"<SCRIPT>x = "<div id='fake'>";</SCRIPT><div id="real"></div>"#);
        assert!(!doc.contains_id("fake").unwrap());
        assert!(doc.contains_id("real").unwrap());
    }
}
