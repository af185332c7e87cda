//! Document tree building and layout lookups
//!
//! HTML notices are parsed into a tree once. Plain-text notices keep the
//! flat string. Both carry the base URL relative links resolve against,
//! when the court has one.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::ContentType;

static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
pub(crate) static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Parsed notification body
pub(crate) enum NotificationBody {
    Html(HtmlDocument),
    Plain(PlainDocument),
}

impl NotificationBody {
    pub(crate) fn build(content_type: ContentType, source: &str, base: Option<Url>) -> Self {
        match content_type {
            ContentType::Html => Self::Html(HtmlDocument::parse(source, base)),
            ContentType::Plain => Self::Plain(PlainDocument::new(source, base)),
        }
    }

    /// Rendered text of the whole notice
    pub(crate) fn text(&self) -> &str {
        match self {
            Self::Html(doc) => doc.text(),
            Self::Plain(doc) => doc.text(),
        }
    }
}

/// A plain-text notice with normalized line endings
pub(crate) struct PlainDocument {
    text: String,
    base: Option<Url>,
}

impl PlainDocument {
    pub(crate) fn new(source: &str, base: Option<Url>) -> Self {
        Self {
            text: source.replace("\r\n", "\n"),
            base,
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn resolve(&self, href: &str) -> Option<String> {
        resolve_link(self.base.as_ref(), href)
    }
}

/// An HTML notice parsed into a tree
pub(crate) struct HtmlDocument {
    html: Html,
    base: Option<Url>,
    text: String,
}

impl HtmlDocument {
    pub(crate) fn parse(source: &str, base: Option<Url>) -> Self {
        let html = Html::parse_document(source);
        let text = html.root_element().text().collect();
        Self { html, base, text }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Absolute target of an anchor, fragment removed
    pub(crate) fn href(&self, anchor: ElementRef<'_>) -> Option<String> {
        resolve_link(self.base.as_ref(), anchor.value().attr("href")?)
    }

    /// Innermost tables mentioning `Case Name:`, in document order
    pub(crate) fn docket_tables(&self) -> Vec<ElementRef<'_>> {
        let matching: Vec<ElementRef<'_>> = self
            .root()
            .select(&TABLE)
            .filter(|table| contains_text(*table, "Case Name:"))
            .collect();
        matching
            .iter()
            .copied()
            .filter(|table| {
                !matching
                    .iter()
                    .any(|other| other.id() != table.id() && is_ancestor(*table, *other))
            })
            .collect()
    }

    /// Elements after `el` in document order, excluding its own subtree
    pub(crate) fn following_elements<'a>(&'a self, el: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let Some(last) = el.descendants().last().map(|n| n.id()) else {
            return Vec::new();
        };
        self.root()
            .descendants()
            .skip_while(|n| n.id() != last)
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    /// Text nodes after `el` in document order, excluding its own subtree
    pub(crate) fn following_texts<'a>(&'a self, el: ElementRef<'a>) -> Vec<&'a str> {
        let Some(last) = el.descendants().last().map(|n| n.id()) else {
            return Vec::new();
        };
        self.root()
            .descendants()
            .skip_while(|n| n.id() != last)
            .skip(1)
            .filter_map(|n| n.value().as_text().map(|t| &**t))
            .collect()
    }
}

/// Resolve `href` against `base` and drop any fragment.
///
/// Without a base only absolute links resolve.
pub(crate) fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    let mut url = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    }
    .ok()?;
    url.set_fragment(None);
    Some(url.into())
}

/// Concatenated text of an element and its descendants
pub(crate) fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub(crate) fn contains_text(el: ElementRef<'_>, needle: &str) -> bool {
    text_content(el).contains(needle)
}

/// Text nodes that are direct children of `el`
pub(crate) fn direct_texts<'a>(el: ElementRef<'a>) -> Vec<&'a str> {
    el.children()
        .filter_map(|n| n.value().as_text().map(|t| &**t))
        .collect()
}

/// First direct text child, trimmed, if it has any content
pub(crate) fn first_direct_text(el: ElementRef<'_>) -> Option<String> {
    direct_texts(el)
        .first()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Direct child elements named `name`
pub(crate) fn child_elements<'a>(el: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == name)
        .collect()
}

/// Following sibling elements of `el`
pub(crate) fn sibling_elements<'a>(el: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap).collect()
}

/// Following sibling text nodes of `el`
pub(crate) fn sibling_texts<'a>(el: ElementRef<'a>) -> Vec<&'a str> {
    el.next_siblings()
        .filter_map(|n| n.value().as_text().map(|t| &**t))
        .collect()
}

/// First element in `scope` named `name` whose text contains `needle`
pub(crate) fn find_element<'a>(
    scope: ElementRef<'a>,
    name: &str,
    needle: &str,
) -> Option<ElementRef<'a>> {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name && contains_text(*e, needle))
}

/// The value cell of a `Label: | value` table row.
///
/// Looks for cells mentioning `label:` and takes the next sibling cell of
/// each. The first such value cell in document order wins.
pub(crate) fn label_cell<'a>(scope: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    let needle = format!("{label}:");
    let values: Vec<_> = scope
        .select(&TD)
        .filter(|td| contains_text(*td, &needle))
        .filter_map(|td| {
            td.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "td")
        })
        .map(|cell| cell.id())
        .collect();

    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| values.contains(&e.id()))
}

fn is_ancestor(ancestor: ElementRef<'_>, el: ElementRef<'_>) -> bool {
    el.ancestors().any(|a| a.id() == ancestor.id())
}
