use super::{container, present, shell, text_el};
use crate::render::{error::RenderError, node::Element};
use domain::{block::WidgetBlock, content::ListingLink};

pub fn render(widget: &WidgetBlock) -> Result<Element, RenderError> {
    let related = widget
        .related_products
        .iter()
        .filter_map(|r| r.as_full())
        .map(|page| related_page(page, widget));

    Ok(shell(
        "bg-gray-50",
        widget.edit.entity(),
        container()
            .child_opt(text_el(
                "h2",
                widget.title_h2.as_ref(),
                "text-3xl md:text-4xl font-bold text-gray-900 text-center mb-8",
                widget.edit.field("title_h2"),
            ))
            .children(related)
            .child_opt(present(widget.kind.as_ref()).map(|kind| {
                Element::new("div")
                    .class("max-w-4xl mx-auto text-center mt-4")
                    .child(
                        Element::new("p")
                            .class("text-lg text-gray-600")
                            .edit(widget.edit.field("type"))
                            .text(format!("Type: {kind}")),
                    )
            })),
    ))
}

fn related_page(page: &ListingLink, widget: &WidgetBlock) -> Element {
    let link = present(page.url.as_ref()).map(|url| {
        Element::new("a")
            .attr("href", url)
            .class("inline-block bg-blue-600 text-white font-semibold px-6 py-3 rounded-lg")
            .edit(widget.edit.field("related_products"))
            .text("View Products")
    });

    Element::new("div")
        .class("max-w-4xl mx-auto bg-white rounded-lg shadow-md p-6 text-center")
        .child(
            Element::new("h3")
                .class("text-xl font-semibold text-gray-900 mb-4")
                .text(&page.title),
        )
        .child_opt(link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn related_listing_pages_link_out_and_stubs_are_skipped() {
        let w: WidgetBlock = serde_json::from_value(json!({
            "title_h2": "Explore",
            "type": "carousel",
            "related_products": [
                { "uid": "l1", "title": "Drums", "url": "/drums" },
                { "uid": "l2" }
            ]
        }))
        .unwrap();
        let html = render(&w).unwrap().into_node().to_html();
        assert!(html.contains(">Drums</h3>"));
        assert!(html.contains(r#"href="/drums""#));
        assert!(html.contains("Type: carousel"));
        assert_eq!(html.matches("<h3").count(), 1);
    }

    #[test]
    fn empty_widget_has_no_inner_markup() {
        let w = WidgetBlock::default();
        let html = render(&w).unwrap().into_node().to_html();
        assert_eq!(
            html,
            r#"<div class="py-12 md:py-16 bg-gray-50"><div class="container mx-auto px-4"></div></div>"#
        );
    }
}
