use super::{container, cta, image, present, shell, text_el};
use crate::render::{error::RenderError, node::Element};
use domain::{block::FromBlogBlock, content::BlogPost};

pub fn render(block: &FromBlogBlock) -> Result<Element, RenderError> {
    let posts = block
        .featured_blogs
        .iter()
        .filter_map(|r| r.as_full())
        .map(teaser);

    Ok(shell(
        "bg-gray-50",
        block.edit.entity(),
        container()
            .child_opt(text_el(
                "h2",
                block.title_h2.as_ref(),
                "text-3xl md:text-4xl font-bold text-gray-900 text-center mb-12",
                block.edit.field("title_h2"),
            ))
            .child(
                Element::new("div")
                    .class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8")
                    .children(posts),
            )
            .child_opt(
                cta(
                    block.view_articles.as_ref(),
                    None,
                    "inline-block text-blue-600 font-semibold",
                    block.edit.field("view_articles"),
                )
                .map(|a| Element::new("div").class("text-center mt-8").child(a)),
            ),
    ))
}

fn teaser(post: &BlogPost) -> Element {
    let title = Element::new("h3")
        .class("text-xl font-semibold mb-2")
        .edit(post.edit.field("title"))
        .text(&post.title);

    let title = match present(post.url.as_ref()) {
        Some(url) => Element::new("a").attr("href", url).child(title),
        None => title,
    };

    Element::new("div")
        .class("bg-white rounded-lg shadow-md overflow-hidden")
        .edit(post.edit.entity())
        .child_opt(
            image(post.featured_image.as_ref(), &post.title, "w-full h-48 object-cover")
                .map(|img| Element::new("div").class("relative w-full h-48").child(img)),
        )
        .child(
            Element::new("div")
                .class("p-6")
                .child(title)
                .child_opt(text_el(
                    "p",
                    post.date.as_ref(),
                    "text-sm text-gray-500 mb-4",
                    post.edit.field("date"),
                )),
        )
}
