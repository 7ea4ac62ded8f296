//! HTML host page as a render target.
//!
//! The host page is parsed once with `scraper`. Slots are located with their
//! CSS selectors; like `querySelector`, only the first match in document order
//! is written. Edits are recorded per slot and applied while serializing, so
//! the parsed document itself is never mutated.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::error::PageError;
use crate::render::{RenderTarget, Slot};

/// Host page used when none is supplied.
pub const DEFAULT_HOST_PAGE: &str = include_str!("../assets/index.html");

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, Default)]
struct SlotEdit {
    text: Option<String>,
    attributes: BTreeMap<String, String>,
    /// In write order; an empty value clears the property.
    styles: Vec<(String, String)>,
}

/// A parsed host page plus the writes made against it.
pub struct HtmlPage {
    document: Html,
    selectors: Vec<(Slot, Selector)>,
    edits: BTreeMap<Slot, SlotEdit>,
    body_notice: Option<String>,
}

impl HtmlPage {
    /// Parse a host page and discover which slots it provides.
    pub fn parse(source: &str) -> Self {
        let document = Html::parse_document(source);
        let selectors = Slot::ALL
            .iter()
            .filter_map(|slot| match Selector::parse(slot.selector()) {
                Ok(selector) => Some((*slot, selector)),
                Err(err) => {
                    tracing::error!(?slot, ?err, "invalid slot selector");
                    None
                }
            })
            .filter(|(_, selector)| document.select(selector).next().is_some())
            .collect::<Vec<_>>();
        tracing::debug!(
            slots = ?selectors.iter().map(|(slot, _)| *slot).collect::<Vec<_>>(),
            "host page slots"
        );
        Self {
            document,
            selectors,
            edits: BTreeMap::new(),
            body_notice: None,
        }
    }

    /// Read and parse a host page from disk.
    pub async fn load(path: &Path) -> Result<Self, PageError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PageError::Read(path.to_path_buf(), e))?;
        Ok(Self::parse(&source))
    }

    /// The embedded default host page.
    pub fn default_host() -> Self {
        Self::parse(DEFAULT_HOST_PAGE)
    }

    /// Whether the body has been replaced by a notice.
    pub fn is_replaced(&self) -> bool {
        self.body_notice.is_some()
    }

    fn edit(&mut self, slot: Slot) -> &mut SlotEdit {
        self.edits.entry(slot).or_default()
    }

    /// Serialize the page with all edits applied.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let mut written = BTreeSet::new();
        for child in self.document.tree.root().children() {
            match child.value() {
                Node::Doctype(doctype) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(doctype.name());
                    out.push_str(">\n");
                }
                Node::Comment(comment) => push_comment(&mut out, comment),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        self.write_element(&mut out, element, &mut written);
                    }
                }
                _ => {}
            }
        }
        out.push('\n');
        out
    }

    /// Write the rendered page to `path`.
    pub async fn write_to(&self, path: &Path) -> Result<(), PageError> {
        tokio::fs::write(path, self.to_html())
            .await
            .map_err(|e| PageError::Write(path.to_path_buf(), e))
    }

    fn slots_for(&self, element: &ElementRef<'_>, written: &BTreeSet<Slot>) -> Vec<Slot> {
        self.selectors
            .iter()
            .filter(|(slot, selector)| !written.contains(slot) && selector.matches(element))
            .map(|(slot, _)| *slot)
            .collect()
    }

    fn write_element(&self, out: &mut String, element: ElementRef<'_>, written: &mut BTreeSet<Slot>) {
        let name = element.value().name();

        let slots = if self.body_notice.is_some() {
            Vec::new()
        } else {
            self.slots_for(&element, written)
        };
        written.extend(slots.iter().copied());
        let edits: Vec<&SlotEdit> = slots.iter().filter_map(|slot| self.edits.get(slot)).collect();

        out.push('<');
        out.push_str(name);
        for (attr, value) in merged_attributes(element, &edits) {
            out.push(' ');
            out.push_str(&attr);
            out.push_str("=\"");
            out.push_str(&escape_attribute(&value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        let raw = RAW_TEXT_ELEMENTS.contains(&name);
        if let (Some(notice), "body") = (self.body_notice.as_deref(), name) {
            out.push_str("<h2>");
            out.push_str(&escape_text(notice));
            out.push_str("</h2>");
        } else if let Some(text) = edits.iter().rev().find_map(|edit| edit.text.as_deref()) {
            if raw {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        } else {
            for child in element.children() {
                match child.value() {
                    Node::Text(text) if raw => out.push_str(text),
                    Node::Text(text) => out.push_str(&escape_text(text)),
                    Node::Comment(comment) => push_comment(out, comment),
                    Node::Element(_) => {
                        if let Some(child) = ElementRef::wrap(child) {
                            self.write_element(out, child, written);
                        }
                    }
                    _ => {}
                }
            }
        }

        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

impl RenderTarget for HtmlPage {
    fn has_slot(&self, slot: Slot) -> bool {
        self.body_notice.is_none() && self.selectors.iter().any(|(s, _)| *s == slot)
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.edit(slot).text = Some(text.to_string());
    }

    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str) {
        self.edit(slot)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&mut self, slot: Slot, property: &str, value: &str) {
        self.edit(slot)
            .styles
            .push((property.to_string(), value.to_string()));
    }

    fn replace_body(&mut self, text: &str) {
        self.edits.clear();
        self.body_notice = Some(text.to_string());
    }
}

/// Element attributes with slot edits layered on top.
///
/// `scraper` hands back attributes sorted by name, so host markup comes out
/// in that order rather than as written.
fn merged_attributes(element: ElementRef<'_>, edits: &[&SlotEdit]) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    for edit in edits {
        for (name, value) in &edit.attributes {
            match attrs.iter_mut().find(|(existing, _)| existing == name) {
                Some(slot) => slot.1 = value.clone(),
                None => attrs.push((name.clone(), value.clone())),
            }
        }
    }

    let style_edits: Vec<&(String, String)> = edits.iter().flat_map(|e| e.styles.iter()).collect();
    if style_edits.is_empty() {
        return attrs;
    }

    let existing = attrs
        .iter()
        .find(|(name, _)| name == "style")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    let mut declarations = parse_inline_style(existing);
    for (property, value) in style_edits {
        declarations.retain(|(p, _)| p != property);
        if !value.is_empty() {
            declarations.push((property.clone(), value.clone()));
        }
    }
    let style = declarations
        .iter()
        .map(|(p, v)| format!("{p}: {v}"))
        .collect::<Vec<_>>()
        .join("; ");

    attrs.retain(|(name, _)| name != "style");
    if !style.is_empty() {
        attrs.push(("style".to_string(), style));
    }
    attrs
}

/// Split an inline `style` attribute into `(property, value)` pairs.
fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            (!property.is_empty()).then(|| (property.to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

fn push_comment(out: &mut String, comment: &str) {
    out.push_str("<!--");
    out.push_str(comment);
    out.push_str("-->");
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
