// crates/serve/src/render/dispatch.rs

//! Block list → rendered units.
//!
//! Every block is rendered on its own and yields its own result, so a broken
//! block becomes one placeholder at its position while its siblings render
//! normally. The output is always positionally aligned with the input.

use super::{
    error::RenderError,
    node::{Element, Node},
    sections::{artist, blog, contact, hero, product, section, specs, team, widget},
};
use domain::{
    block::{ContentBlock, ProductModule},
    edit::EditAttrs,
    page::{ArtistSlots, PageKind},
};
use tracing::warn;

/// Marker the visual editor looks for to offer "insert first block".
pub const EMPTY_BLOCK_PARENT_CLASS: &str = "visual-builder__empty-block-parent";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedBlock {
    /// Nothing to show at this position (unrecognised or empty block).
    Empty,
    Rendered(Element),
    Failed { tag: &'static str, reason: String },
}

impl RenderedBlock {
    pub fn is_failed(&self) -> bool {
        matches!(self, RenderedBlock::Failed { .. })
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            RenderedBlock::Empty => None,
            RenderedBlock::Rendered(el) => Some(el.into_node()),
            RenderedBlock::Failed { tag, .. } => Some(error_placeholder(tag).into_node()),
        }
    }

    fn from_result(
        position: usize,
        tag: &'static str,
        result: Result<Option<Element>, RenderError>,
    ) -> Self {
        match result {
            Ok(Some(el)) => RenderedBlock::Rendered(el),
            Ok(None) => RenderedBlock::Empty,
            Err(e) => {
                warn!(position, tag, "block failed to render: {}", e);
                RenderedBlock::Failed {
                    tag,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Heading above product grids; listing pages use the plain one.
fn grid_heading(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Homepage => "Featured Products",
        PageKind::ProductListing => "Products",
    }
}

pub fn render_block(block: &ContentBlock, kind: PageKind) -> Result<Option<Element>, RenderError> {
    match block {
        ContentBlock::HeroBanner(b) => hero::render(b),
        ContentBlock::ProductGrid(b) => product::render_grid(b, grid_heading(kind)).map(Some),
        ContentBlock::Section(b) => section::render_section(b).map(Some),
        ContentBlock::SectionWithBuckets(b) => section::render_buckets(b).map(Some),
        ContentBlock::SectionWithCards(b) => section::render_cards(b).map(Some),
        ContentBlock::SectionWithHtmlCode(b) => section::render_html_code(b).map(Some),
        ContentBlock::Widget(b) => widget::render(b).map(Some),
        ContentBlock::ContactUs(b) => contact::render(b).map(Some),
        ContentBlock::FromBlog(b) => blog::render(b).map(Some),
        ContentBlock::OurTeam(b) => team::render(b).map(Some),
        ContentBlock::Malformed { tag, reason } => Err(RenderError::Malformed {
            tag: tag.as_str(),
            reason: reason.clone(),
        }),
        ContentBlock::Empty => Ok(None),
    }
}

/// One result per input block, in input order.
pub fn render_blocks(blocks: &[ContentBlock], kind: PageKind) -> Vec<RenderedBlock> {
    blocks
        .iter()
        .enumerate()
        .map(|(position, block)| {
            let tag = block.tag().map_or("unknown", |t| t.as_str());
            RenderedBlock::from_result(position, tag, render_block(block, kind))
        })
        .collect()
}

/// Product detail modules; stub artists are drawn from `artists`, keyed by
/// module position.
pub fn render_product_modules(
    modules: &[ProductModule],
    artists: &ArtistSlots,
) -> Vec<RenderedBlock> {
    modules
        .iter()
        .enumerate()
        .map(|(position, module)| {
            let (tag, result) = match module {
                ProductModule::FeaturedArtist(b) => {
                    ("featured_artist", artist::render(b, artists.get(&position)))
                }
                ProductModule::ProductSpecs(b) => ("product_specs", specs::render(b)),
                ProductModule::SectionWithCards(b) => {
                    ("section_with_cards", section::render_cards(b).map(Some))
                }
                ProductModule::Malformed { tag, reason } => (
                    *tag,
                    Err(RenderError::Malformed {
                        tag: *tag,
                        reason: reason.clone(),
                    }),
                ),
                ProductModule::Empty => ("unknown", Ok(None)),
            };
            RenderedBlock::from_result(position, tag, result)
        })
        .collect()
}

/// The element wrapping a page's block list. Carries the empty-list marker
/// when there are no blocks, and the page's `page_components` edit token.
pub fn blocks_container(rendered: Vec<RenderedBlock>, attrs: Option<&EditAttrs>) -> Element {
    let container = Element::new("div").class("page-components").edit(attrs);
    let container = if rendered.is_empty() {
        container.class(EMPTY_BLOCK_PARENT_CLASS)
    } else {
        container
    };
    container.children(rendered.into_iter().filter_map(RenderedBlock::into_node))
}

pub fn error_placeholder(tag: &str) -> Element {
    Element::new("div")
        .class("block-error bg-red-50 border border-red-200 p-4 m-4 rounded")
        .attr("role", "alert")
        .attr("data-block", tag)
        .child(
            Element::new("p")
                .class("text-red-800")
                .text("Error rendering component"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blocks(v: serde_json::Value) -> Vec<ContentBlock> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn output_is_positionally_aligned_with_input() {
        let list = blocks(json!([
            { "section": { "title_h2": "one" } },
            { "carousel": {} },
            {},
            { "widget": { "title_h2": "four" } }
        ]));
        let out = render_blocks(&list, PageKind::Homepage);
        assert_eq!(out.len(), 4);
        assert!(matches!(out[0], RenderedBlock::Rendered(_)));
        assert_eq!(out[1], RenderedBlock::Empty);
        assert_eq!(out[2], RenderedBlock::Empty);
        assert!(matches!(out[3], RenderedBlock::Rendered(_)));
    }

    #[test]
    fn null_product_list_fails_only_its_own_position() {
        let list = blocks(json!([
            { "section": { "title_h2": "first" } },
            { "product": { "product": null } },
            { "section": { "title_h2": "third" } }
        ]));
        let out = render_blocks(&list, PageKind::ProductListing);
        assert!(!out[0].is_failed());
        assert!(matches!(out[1], RenderedBlock::Failed { tag: "product", .. }));
        assert!(!out[2].is_failed());

        let html = blocks_container(out, None).into_node().to_html();
        assert!(html.contains(">first</h2>"));
        assert!(html.contains("Error rendering component"));
        assert!(html.contains(">third</h2>"));
        assert_eq!(html.matches("block-error").count(), 1);
    }

    #[test]
    fn undecodable_payload_becomes_a_placeholder() {
        let list = blocks(json!([{ "section_with_cards": { "cards": 7 } }]));
        let out = render_blocks(&list, PageKind::Homepage);
        assert!(matches!(
            out[0],
            RenderedBlock::Failed {
                tag: "section_with_cards",
                ..
            }
        ));
    }

    #[test]
    fn empty_list_marker_only_on_empty_lists() {
        let empty = blocks_container(Vec::new(), None);
        assert!(empty.has_class(EMPTY_BLOCK_PARENT_CLASS));

        let list = blocks(json!([{ "section": {} }]));
        let full = blocks_container(render_blocks(&list, PageKind::Homepage), None);
        assert!(!full.has_class(EMPTY_BLOCK_PARENT_CLASS));
    }

    #[test]
    fn list_of_only_unrecognised_blocks_is_not_marked_empty() {
        let list = blocks(json!([{ "carousel": {} }]));
        let el = blocks_container(render_blocks(&list, PageKind::Homepage), None);
        assert!(!el.has_class(EMPTY_BLOCK_PARENT_CLASS));
        assert!(el.child_nodes().is_empty());
    }

    #[test]
    fn grid_heading_depends_on_page_kind() {
        let list = blocks(json!([{ "product": { "product": [] } }]));
        let home = blocks_container(render_blocks(&list, PageKind::Homepage), None);
        assert!(home.into_node().to_html().contains("Featured Products"));
    }

    #[test]
    fn product_modules_use_artist_slots_by_position() {
        let modules: Vec<ProductModule> = serde_json::from_value(json!([
            { "product_specs": { "specs": { "set_type": "kit" } } },
            { "featured_artist": { "author": [{ "uid": "a1" }] } },
            { "gallery": {} }
        ]))
        .unwrap();

        let mut slots = ArtistSlots::new();
        slots.insert(1, domain::page::LoadState::Failed);

        let out = render_product_modules(&modules, &slots);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], RenderedBlock::Empty);
        let html = match &out[1] {
            RenderedBlock::Rendered(el) => el.clone().into_node().to_html(),
            other => panic!("unexpected: {other:?}"),
        };
        assert!(html.contains("Unable to load artist information."));
    }
}
