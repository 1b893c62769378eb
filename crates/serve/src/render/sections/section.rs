use super::{container, cta, image, present, shell, text_el, H2_CLASS};
use crate::render::{
    error::RenderError,
    node::{Element, Node},
    sanitize::sanitize_html,
};
use domain::block::{Bucket, Card, Section, SectionWithBuckets, SectionWithCards, SectionWithHtmlCode};

const BUTTON_CLASS: &str =
    "inline-block bg-blue-600 hover:bg-blue-700 text-white font-semibold px-6 py-3 rounded-lg";
const LEAD_CLASS: &str = "text-lg text-gray-600";
const ARROW_LINK_CLASS: &str = "text-blue-600 hover:text-blue-800 font-medium";

pub fn render_section(section: &Section) -> Result<Element, RenderError> {
    let text = Element::new("div")
        .class("space-y-4")
        .child_opt(text_el(
            "h2",
            section.title_h2.as_ref(),
            H2_CLASS,
            section.edit.field("title_h2"),
        ))
        .child_opt(text_el(
            "p",
            section.description.as_ref(),
            LEAD_CLASS,
            section.edit.field("description"),
        ))
        .child_opt(cta(
            section.call_to_action.as_ref(),
            None,
            BUTTON_CLASS,
            section.edit.field("call_to_action"),
        ));

    let alt = present(section.title_h2.as_ref()).unwrap_or("Section image");
    let picture = image(section.image.as_ref(), alt, "w-full object-cover").map(|img| {
        Element::new("div")
            .class("relative aspect-video rounded-lg overflow-hidden shadow-lg")
            .child(img)
    });

    let mut grid = Element::new("div").class("grid grid-cols-1 md:grid-cols-2 gap-8 items-center");
    if section.is_image_right_aligned {
        grid = grid.class("md:flex-row-reverse");
    }

    Ok(shell(
        "bg-white",
        section.edit.entity(),
        container().child(grid.child(text).child_opt(picture)),
    ))
}

pub fn render_buckets(section: &SectionWithBuckets) -> Result<Element, RenderError> {
    let layout = if section.tabular_buckets {
        "grid grid-cols-1 md:grid-cols-2 gap-4"
    } else {
        "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8"
    };

    Ok(shell(
        "bg-gray-50",
        section.edit.entity(),
        container()
            .child_opt(text_el(
                "h2",
                section.title_h2.as_ref(),
                "text-3xl md:text-4xl font-bold text-gray-900 text-center mb-4",
                section.edit.field("title_h2"),
            ))
            .child_opt(text_el(
                "p",
                section.description.as_ref(),
                "text-lg text-gray-600 text-center mb-12 max-w-3xl mx-auto",
                section.edit.field("description"),
            ))
            .child(
                Element::new("div")
                    .class(layout)
                    .children(section.buckets.iter().map(bucket)),
            ),
    ))
}

fn bucket(bucket: &Bucket) -> Element {
    let title = present(bucket.title_h3.as_ref());

    Element::new("div")
        .class("bg-white p-6 rounded-lg shadow-md")
        .edit(bucket.edit.entity())
        .child_opt(
            image(bucket.icon.as_ref(), title.unwrap_or("Icon"), "w-16 h-16 object-contain")
                .map(|img| Element::new("div").class("w-16 h-16 mb-4").child(img)),
        )
        .child_opt(
            image(
                bucket.image.as_ref(),
                title.unwrap_or("Bucket image"),
                "w-full object-cover",
            )
            .map(|img| {
                Element::new("div")
                    .class("relative aspect-video mb-4 rounded-lg overflow-hidden")
                    .child(img)
            }),
        )
        .child_opt(text_el(
            "h3",
            bucket.title_h3.as_ref(),
            "text-xl font-semibold text-gray-900 mb-3",
            bucket.edit.field("title_h3"),
        ))
        .child_opt(text_el(
            "p",
            bucket.description.as_ref(),
            "text-gray-600 mb-4",
            bucket.edit.field("description"),
        ))
        .child_opt(arrow_link(bucket.call_to_action.as_ref()))
}

pub fn render_cards(section: &SectionWithCards) -> Result<Element, RenderError> {
    Ok(shell(
        "bg-white",
        section.edit.entity(),
        container()
            .child_opt(text_el(
                "h2",
                section.section_title.as_ref(),
                "text-3xl md:text-4xl font-bold text-gray-900 text-center mb-4",
                section.edit.field("section_title"),
            ))
            .child_opt(text_el(
                "p",
                section.section_description.as_ref(),
                "text-lg text-gray-600 text-center mb-12 max-w-3xl mx-auto",
                section.edit.field("section_description"),
            ))
            .child(
                Element::new("div")
                    .class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6")
                    .children(section.cards.iter().map(card)),
            ),
    ))
}

fn card(card: &Card) -> Element {
    let alt = present(card.card_title_h3.as_ref()).unwrap_or("Card image");

    Element::new("div")
        .class("bg-white border border-gray-200 rounded-lg overflow-hidden")
        .edit(card.edit.entity())
        .child_opt(
            image(card.image.as_ref(), alt, "w-full object-cover")
                .map(|img| Element::new("div").class("relative aspect-video").child(img)),
        )
        .child(
            Element::new("div")
                .class("p-6")
                .child_opt(text_el(
                    "h3",
                    card.card_title_h3.as_ref(),
                    "text-xl font-semibold text-gray-900 mb-3",
                    card.edit.field("card_title_h3"),
                ))
                .child_opt(text_el(
                    "p",
                    card.description.as_ref(),
                    "text-gray-600 mb-4",
                    card.edit.field("description"),
                ))
                .child_opt(arrow_link(card.call_to_action.as_ref())),
        )
}

fn arrow_link(link: Option<&domain::content::Link>) -> Option<Element> {
    let link = link?;
    let href = link.target()?;
    let label = link.label()?;
    Some(
        Element::new("a")
            .attr("href", href)
            .class(ARROW_LINK_CLASS)
            .text(format!("{label} →")),
    )
}

/// Author-supplied markup goes through the sanitiser before it is emitted.
pub fn render_html_code(section: &SectionWithHtmlCode) -> Result<Element, RenderError> {
    let markup = match present(section.html_code.as_ref()) {
        Some(raw) => Some(sanitize_html(raw)?),
        None => None,
    };

    let align = if section.left_aligned {
        "text-left"
    } else {
        "text-center"
    };

    Ok(shell(
        "bg-gray-50",
        section.edit.entity(),
        container()
            .child_opt(text_el(
                "h2",
                section.title.as_ref(),
                "text-3xl md:text-4xl font-bold text-gray-900 mb-4",
                section.edit.field("title"),
            ))
            .child_opt(text_el(
                "p",
                section.description.as_ref(),
                "text-lg text-gray-600 mb-8",
                section.edit.field("description"),
            ))
            .child_opt(markup.filter(|m| !m.trim().is_empty()).map(|m| {
                Element::new("div")
                    .class("prose max-w-none")
                    .class(align)
                    .edit(section.edit.field("html_code"))
                    .child(Node::Raw(m))
            })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_omits_missing_optional_fields() {
        let s: Section = serde_json::from_value(json!({ "title_h2": "About" })).unwrap();
        let html = render_section(&s).unwrap().into_node().to_html();
        assert!(html.contains(">About</h2>"));
        assert!(!html.contains("<p"));
        assert!(!html.contains("<a"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn section_field_tokens_land_on_their_elements() {
        let s: Section = serde_json::from_value(json!({
            "title_h2": "About",
            "description": "Us",
            "$": {
                "title_h2": { "data-cslp": "page.b1.en-us.title_h2" },
                "description": { "data-cslp": "page.b1.en-us.description" }
            }
        }))
        .unwrap();
        let html = render_section(&s).unwrap().into_node().to_html();
        assert!(html.contains(r#"<h2 class="text-3xl md:text-4xl font-bold text-gray-900" data-cslp="page.b1.en-us.title_h2">About</h2>"#));
        assert!(html.contains(r#"data-cslp="page.b1.en-us.description">Us</p>"#));
    }

    #[test]
    fn html_code_is_sanitised() {
        let s: SectionWithHtmlCode = serde_json::from_value(json!({
            "html_code": "<p>Hi</p><script>x</script>",
            "is_html_code_left_aligned_": true
        }))
        .unwrap();
        let html = render_html_code(&s).unwrap().into_node().to_html();
        assert!(html.contains(r#"<div class="prose max-w-none text-left"><p>Hi</p></div>"#));
        assert!(!html.contains("script"));
    }

    #[test]
    fn cards_and_buckets_render_each_item() {
        let cards: SectionWithCards = serde_json::from_value(json!({
            "cards": [ { "card_title_h3": "One" }, { "card_title_h3": "Two" } ]
        }))
        .unwrap();
        let html = render_cards(&cards).unwrap().into_node().to_html();
        assert!(html.contains(">One</h3>") && html.contains(">Two</h3>"));

        let buckets: SectionWithBuckets = serde_json::from_value(json!({
            "title_h2": "Why us",
            "buckets": [ { "title_h3": "Fast", "call_to_action": { "title": "More", "href": "/fast" } } ]
        }))
        .unwrap();
        let html = render_buckets(&buckets).unwrap().into_node().to_html();
        assert!(html.contains(">Fast</h3>"));
        assert!(html.contains(r#"href="/fast""#));
    }
}
