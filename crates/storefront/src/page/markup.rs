//! Pre-rendered display units read out of hand-written markup.
//!
//! The grid fragment must be well-formed XHTML: a single container element
//! whose `card` children are the display units. Filter fields are taken from
//! `data-*` attributes when present, otherwise from the visible text:
//!
//! | field       | attribute       | text fallback    |
//! |-------------|-----------------|------------------|
//! | name        | `data-name`     | first `h3`       |
//! | description | `data-desc`     | first `p`        |
//! | category    | `data-category` | first `.badge`   |
//! | price       | `data-price`    | first `.price`   |
//! | key         | `data-id`       | unit position    |
//!
//! Keys are unique within a grid: a repeated key gets a `-<n>` suffix. An
//! authored `hidden` attribute is dropped, since each pass owns visibility.

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

use askama::filters::{Html, escape};
use roxmltree::{Document, Node};
use showcase_core::Category;
use thiserror::Error;

use super::{ActionControl, DisplayUnit, UnitContent, UnitKey};
use crate::catalog::engine::parse_price_text;

/// Errors reading a pre-rendered grid.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("markup parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Filter fields of a pre-rendered unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitFields {
    pub name: String,
    pub desc: String,
    pub category: Category,
    pub price: u64,
}

/// A display unit that already existed in the page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerenderedUnit {
    markup: String,
    /// Byte offset just past the element name in the opening tag.
    tag_end: usize,
    fields: UnitFields,
}

impl PrerenderedUnit {
    #[must_use]
    pub const fn fields(&self) -> &UnitFields {
        &self.fields
    }

    /// The original markup with `data-key` (and `hidden` when hidden) added to
    /// the opening tag.
    #[must_use]
    pub fn to_html(&self, key: &UnitKey, hidden: bool) -> String {
        let Some((open, rest)) = self.markup.split_at_checked(self.tag_end) else {
            return self.markup.clone();
        };

        let Ok(key) = escape(key, Html);
        let mut html = String::with_capacity(self.markup.len() + 32);
        html.push_str(open);
        html.push_str(" data-key=\"");
        html.push_str(&key.to_string());
        html.push('"');
        if hidden {
            html.push_str(" hidden=\"\"");
        }
        html.push_str(rest);
        html
    }
}

/// Parse a grid fragment into display units, in markup order.
///
/// # Errors
///
/// Returns `MarkupError::Xml` if the fragment is not well-formed.
pub fn parse_grid(source: &str) -> Result<Vec<DisplayUnit>, MarkupError> {
    let doc = Document::parse(source)?;
    let mut units: Vec<DisplayUnit> = doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && has_class(*n, "card"))
        .enumerate()
        .map(|(position, node)| read_unit(source, node, position))
        .collect();
    dedupe_keys(&mut units);
    Ok(units)
}

/// Suffix repeated keys so every unit can be addressed on its own.
///
/// The first unit with a key keeps it; later ones get the first free
/// `<key>-<n>` (n from 2) that no other unit was authored with.
fn dedupe_keys(units: &mut [DisplayUnit]) {
    let authored: HashSet<UnitKey> = units.iter().map(|u| u.key.clone()).collect();
    let mut taken = HashSet::with_capacity(units.len());

    for unit in units {
        if taken.insert(unit.key.clone()) {
            continue;
        }
        let free = (2_usize..)
            .map(|n| UnitKey::new(format!("{}-{n}", unit.key)))
            .find(|candidate| !authored.contains(candidate) && !taken.contains(candidate));
        if let Some(key) = free {
            taken.insert(key.clone());
            unit.key = key;
        }
    }
}

/// Read and parse a grid fragment from disk.
///
/// # Errors
///
/// Returns `MarkupError` if the file cannot be read or parsed.
pub async fn load_grid(path: &Path) -> Result<Vec<DisplayUnit>, MarkupError> {
    let source = tokio::fs::read_to_string(path).await?;
    parse_grid(&source)
}

fn read_unit(source: &str, node: Node<'_, '_>, position: usize) -> DisplayUnit {
    let name = field(node, "data-name", |n| n.tag_name().name() == "h3");
    let desc = field(node, "data-desc", |n| n.tag_name().name() == "p");
    let category = field(node, "data-category", |n| has_class(n, "badge"));
    let price = field(node, "data-price", |n| has_class(n, "price"));

    let key = attribute(node, "data-id").unwrap_or_else(|| format!("unit-{position}"));

    let action = find(node, |n| has_class(n, "btn")).map(|button| ActionControl {
        disabled: button.has_attribute("disabled"),
        handler: None,
    });

    let mut markup = source.get(node.range()).unwrap_or_default().to_string();
    if let Some(hidden) = node.attributes().find(|a| a.name() == "hidden") {
        strip_attribute(&mut markup, node.range().start, hidden.range());
    }
    let tag_end = markup
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c.is_whitespace() || c == '>' || c == '/')
        .map_or(markup.len(), |(i, _)| i);

    DisplayUnit {
        key: UnitKey::new(key),
        position,
        hidden: false,
        content: UnitContent::Prerendered(PrerenderedUnit {
            markup,
            tag_end,
            fields: UnitFields {
                name,
                desc,
                category: Category::new(&category),
                price: parse_price_text(&price),
            },
        }),
        action,
    }
}

/// Attribute value if present, else the text of the first matching descendant.
fn field(node: Node<'_, '_>, attr: &str, fallback: impl Fn(Node<'_, '_>) -> bool) -> String {
    attribute(node, attr)
        .or_else(|| find(node, fallback).map(text_of))
        .unwrap_or_default()
}

fn attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn find<'a, 'input>(
    node: Node<'a, 'input>,
    predicate: impl Fn(Node<'a, 'input>) -> bool,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && predicate(*n))
}

fn has_class(node: Node<'_, '_>, class: &str) -> bool {
    node.attribute("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

fn text_of(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_string()
}

/// Remove an attribute (and the whitespace before it) from a unit's markup.
///
/// `range` is in document bytes; `base` is where the unit starts.
fn strip_attribute(markup: &mut String, base: usize, range: Range<usize>) {
    let end = range.end.saturating_sub(base);
    let start = markup
        .get(..range.start.saturating_sub(base))
        .map_or(0, |before| before.trim_end().len());
    if markup.get(start..end).is_some() {
        markup.replace_range(start..end, "");
    }
}
