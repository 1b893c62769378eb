// crates/serve/src/render/sections/mod.rs

//! One renderer per block kind. Every renderer is a pure function of its
//! payload; optional fields that are absent produce no markup at all.

pub mod artist;
pub mod blog;
pub mod contact;
pub mod hero;
pub mod product;
pub mod section;
pub mod specs;
pub mod team;
pub mod widget;

use super::node::Element;
use domain::{
    content::{File, Link},
    edit::EditAttrs,
};

pub(crate) const H2_CLASS: &str = "text-3xl md:text-4xl font-bold text-gray-900";

/// `Some` only for strings with visible content.
pub(crate) fn present(s: Option<&String>) -> Option<&str> {
    s.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Outer wrapper + container shared by every full-width section.
pub(crate) fn shell(background: &str, entity: Option<&EditAttrs>, inner: Element) -> Element {
    Element::new("div")
        .class("py-12 md:py-16")
        .class(background)
        .edit(entity)
        .child(inner)
}

pub(crate) fn container() -> Element {
    Element::new("div").class("container mx-auto px-4")
}

pub(crate) fn text_el(
    tag: &'static str,
    text: Option<&String>,
    class: &str,
    attrs: Option<&EditAttrs>,
) -> Option<Element> {
    present(text).map(|t| Element::new(tag).class(class).edit(attrs).text(t))
}

/// An `<img>` for a media reference. No URL → no element.
pub(crate) fn image(file: Option<&File>, alt: &str, class: &str) -> Option<Element> {
    let file = file?;
    let src = file.src()?;
    Some(
        Element::new("img")
            .attr("src", src)
            .attr("alt", alt)
            .attr("loading", "lazy")
            .class(class)
            .edit(file.edit.entity()),
    )
}

/// A call-to-action anchor. Needs a target and a label (or a fallback label).
pub(crate) fn cta(
    link: Option<&Link>,
    fallback_label: Option<&str>,
    class: &str,
    attrs: Option<&EditAttrs>,
) -> Option<Element> {
    let link = link?;
    let href = link.target()?;
    let label = link.label().or(fallback_label)?;
    Some(
        Element::new("a")
            .attr("href", href)
            .class(class)
            .edit(attrs)
            .text(label),
    )
}
