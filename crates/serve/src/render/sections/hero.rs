use super::{cta, image, present, text_el};
use crate::render::{error::RenderError, node::Element};
use domain::{
    block::HeroBannerBlock,
    content::{Alignment, Color, HeroBanner},
};
use tracing::debug;

/// Renders every populated banner in the block; `None` when there is none.
pub fn render(block: &HeroBannerBlock) -> Result<Option<Element>, RenderError> {
    let banners: Vec<Element> = block
        .hero_banner
        .iter()
        .filter_map(|r| {
            let full = r.as_full();
            if full.is_none() {
                debug!("skipping unresolved hero banner `{}`", r.uid());
            }
            full
        })
        .map(banner)
        .collect();

    if banners.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        Element::new("div")
            .edit(block.edit.entity())
            .children(banners),
    ))
}

pub fn banner(banner: &HeroBanner) -> Element {
    let content_align = banner
        .content_title_alignment
        .unwrap_or(Alignment::Left)
        .text_class();
    let image_align = banner
        .banner_image_alignment
        .unwrap_or(Alignment::Center)
        .text_class();

    let mut style = Vec::new();
    if let Some(bg) = css_color(banner.background_color.as_ref()) {
        style.push(format!("background-color: {bg}"));
    }
    if let Some(fg) = css_color(banner.text_color.as_ref()) {
        style.push(format!("color: {fg}"));
    }

    let title = present(Some(&banner.title)).map(|t| {
        Element::new("h1")
            .class("text-5xl md:text-6xl font-black leading-tight uppercase tracking-tight")
            .edit(banner.edit.field("title"))
            .text(t)
    });

    let content = Element::new("div")
        .class(content_align)
        .class("space-y-8")
        .child_opt(title)
        .child_opt(text_el(
            "p",
            banner.banner_description.as_ref(),
            "text-xl md:text-2xl font-medium leading-relaxed",
            banner.edit.field("banner_description"),
        ))
        .child_opt(cta(
            banner.call_to_action.as_ref(),
            Some("Learn More"),
            "inline-block font-black px-12 py-5 rounded-xl uppercase tracking-wider",
            banner.edit.field("call_to_action"),
        ));

    let picture = image(
        banner.banner_image.as_ref(),
        &banner.title,
        "w-full aspect-video rounded-2xl object-cover",
    )
    .map(|img| Element::new("div").class(image_align).child(img));

    let width = if banner.full_width {
        "w-full"
    } else {
        "container mx-auto"
    };

    Element::new("div")
        .class("hero-banner relative w-full overflow-hidden")
        .attr_opt("style", (!style.is_empty()).then(|| style.join("; ")))
        .edit(banner.edit.entity())
        .child(
            Element::new("div")
                .class(width)
                .class("px-4 py-16 md:py-28 relative")
                .child(
                    Element::new("div")
                        .class("grid grid-cols-1 md:grid-cols-2 gap-12 items-center")
                        .child(content)
                        .child_opt(picture),
                ),
        )
}

/// Authored colour values restricted to characters a CSS colour can contain.
fn css_color(color: Option<&Color>) -> Option<&str> {
    let value = present(color?.color.as_ref())?;
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "#(),.% ".contains(c))
        .then_some(value)
}
