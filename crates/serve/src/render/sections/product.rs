use super::{container, image, shell, text_el, H2_CLASS};
use crate::render::{error::RenderError, node::Element};
use domain::{block::ProductBlock, content::Product};
use tracing::debug;

/// A grid of product cards under `heading`.
///
/// A block whose product list is absent is malformed; stubs that survived
/// resolution are left out of the grid.
pub fn render_grid(block: &ProductBlock, heading: &str) -> Result<Element, RenderError> {
    let products = block.product.as_ref().ok_or(RenderError::MissingField {
        block: "product",
        field: "product",
    })?;

    let cards = products.iter().filter_map(|r| match r.as_full() {
        Some(p) => Some(card(p)),
        None => {
            debug!("skipping unresolved product `{}`", r.uid());
            None
        }
    });

    Ok(shell(
        "bg-white",
        block.edit.entity(),
        container()
            .child(
                Element::new("h2")
                    .class(H2_CLASS)
                    .class("text-center mb-12")
                    .text(heading),
            )
            .child(
                Element::new("div")
                    .class("grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6")
                    .children(cards),
            ),
    ))
}

pub fn card(product: &Product) -> Element {
    let picture = image(
        product.featured_image.first(),
        &product.title,
        "w-full h-full object-cover",
    )
    .unwrap_or_else(|| {
        Element::new("div")
            .class("w-full h-full flex items-center justify-center text-gray-400")
            .text("No Image")
    });

    let footer = Element::new("div")
        .class("flex items-center justify-between")
        .child_opt(price(product, "text-xl font-bold text-gray-900"))
        .child_opt(
            product
                .call_to_action
                .as_ref()
                .and_then(|l| l.label())
                .map(|label| {
                    Element::new("span")
                        .class("text-sm text-blue-600 font-medium")
                        .text(format!("{label} →"))
                }),
        );

    Element::new("a")
        .attr("href", product.href())
        .class("product-card group block bg-white rounded-lg shadow-md overflow-hidden")
        .edit(product.edit.entity())
        .child(
            Element::new("div")
                .class("relative aspect-square overflow-hidden bg-gray-100")
                .child(picture),
        )
        .child(
            Element::new("div")
                .class("p-4")
                .child(
                    Element::new("h3")
                        .class("text-lg font-semibold text-gray-900 mb-2")
                        .edit(product.edit.field("title"))
                        .text(&product.title),
                )
                .child_opt(text_el(
                    "p",
                    product.description.as_ref(),
                    "text-sm text-gray-600 mb-3",
                    product.edit.field("description"),
                ))
                .child(footer),
        )
}

/// Formatted price, or nothing when the product has none.
pub(crate) fn price(product: &Product, class: &str) -> Option<Element> {
    product.price.map(|p| {
        Element::new("span")
            .class(class)
            .edit(product.edit.field("price"))
            .text(format!("${p:.2}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(v: serde_json::Value) -> ProductBlock {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn absent_list_is_a_render_error() {
        let b = block(json!({ "product": null }));
        assert!(matches!(
            render_grid(&b, "Products"),
            Err(RenderError::MissingField { block: "product", .. })
        ));
    }

    #[test]
    fn grid_shows_full_products_and_skips_stubs() {
        let b = block(json!({ "product": [
            { "uid": "p1", "title": "Snare", "price": 120.5 },
            { "uid": "p2" }
        ] }));
        let html = render_grid(&b, "Featured Products")
            .unwrap()
            .into_node()
            .to_html();
        assert!(html.contains("Featured Products"));
        assert!(html.contains(">Snare</h3>"));
        assert!(html.contains("$120.50"));
        assert!(html.contains(r#"href="/product/p1""#));
        assert!(!html.contains("p2"));
    }

    #[test]
    fn card_without_image_or_price_degrades() {
        let p: Product = serde_json::from_value(json!({
            "uid": "p3",
            "title": "Cymbal",
            "url": "/cymbal"
        }))
        .unwrap();
        let html = card(&p).into_node().to_html();
        assert!(html.contains("No Image"));
        assert!(!html.contains('$'));
        assert!(html.contains(r#"href="/cymbal""#));
    }
}
