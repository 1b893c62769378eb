// crates/serve/src/render/sections/artist.rs

//! Featured artist on the product detail page.
//!
//! When the artist arrives as a stub the session looks it up on its own and
//! hands the outcome in as a [`LoadState`]: loading, then the artist or an
//! inline failure notice.

use super::{container, image, shell, text_el, H2_CLASS};
use crate::render::{error::RenderError, node::Element};
use domain::{
    block::FeaturedArtistBlock,
    content::Author,
    page::LoadState,
    reference::Reference,
};

const HEADING: &str = "Featured Artist";

pub fn render(
    block: &FeaturedArtistBlock,
    lookup: Option<&LoadState<Author>>,
) -> Result<Option<Element>, RenderError> {
    let Some(candidate) = block.artist() else {
        return Ok(None);
    };

    let el = match (candidate, lookup) {
        (Reference::Full(author), _) | (Reference::Stub { .. }, Some(LoadState::Ready(author))) => {
            artist(author)
        }
        (Reference::Stub { .. }, Some(LoadState::Failed)) => {
            notice("Unable to load artist information.")
        }
        (Reference::Stub { .. }, Some(LoadState::Loading) | None) => {
            notice("Loading artist information...").attr("aria-busy", "true")
        }
    };

    Ok(Some(match block.edit.entity() {
        Some(attrs) => Element::new("div").edit(Some(attrs)).child(el),
        None => el,
    }))
}

fn notice(message: &str) -> Element {
    shell(
        "bg-gray-50",
        None,
        container().child(heading()).child(
            Element::new("p")
                .class("text-center text-gray-600")
                .text(message),
        ),
    )
}

fn heading() -> Element {
    Element::new("h2")
        .class(H2_CLASS)
        .class("text-center mb-8")
        .text(HEADING)
}

pub fn artist(author: &Author) -> Element {
    let picture = image(author.picture.as_ref(), &author.title, "w-48 h-48 object-cover")
        .map(|img| {
            Element::new("div")
                .class("md:col-span-1 flex justify-center items-start")
                .child(
                    Element::new("div")
                        .class("w-48 h-48 rounded-full overflow-hidden shadow-xl")
                        .child(img),
                )
        });

    let span = if picture.is_some() {
        "md:col-span-2"
    } else {
        "md:col-span-3"
    };

    let info = Element::new("div")
        .class(span)
        .class("space-y-4")
        .child(
            Element::new("h3")
                .class("text-2xl md:text-3xl font-bold text-gray-900")
                .edit(author.edit.field("title"))
                .text(&author.title),
        )
        .child_opt(text_el(
            "p",
            author.bio.as_ref(),
            "text-lg text-gray-700 leading-relaxed whitespace-pre-wrap",
            author.edit.field("bio"),
        ));

    shell(
        "bg-gray-50",
        author.edit.entity(),
        container().child(heading()).child(
            Element::new("div")
                .class("max-w-4xl mx-auto bg-white rounded-lg shadow-lg overflow-hidden")
                .child(
                    Element::new("div")
                        .class("grid grid-cols-1 md:grid-cols-3 gap-8 p-8")
                        .child_opt(picture)
                        .child(info),
                ),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(v: serde_json::Value) -> FeaturedArtistBlock {
        serde_json::from_value(v).unwrap()
    }

    fn html(el: Option<Element>) -> String {
        el.map(|e| e.into_node().to_html()).unwrap_or_default()
    }

    #[test]
    fn populated_artist_renders_directly() {
        let b = block(json!({ "author": [{ "uid": "a1", "title": "Mia", "bio": "Drummer" }] }));
        let out = html(render(&b, None).unwrap());
        assert!(out.contains(">Mia</h3>"));
        assert!(out.contains("Drummer"));
    }

    #[test]
    fn stub_artist_follows_the_lookup_state() {
        let b = block(json!({ "author": [{ "uid": "a1" }] }));

        assert!(html(render(&b, None).unwrap()).contains("Loading artist information..."));
        assert!(html(render(&b, Some(&LoadState::Loading)).unwrap()).contains("aria-busy"));
        assert!(html(render(&b, Some(&LoadState::Failed)).unwrap())
            .contains("Unable to load artist information."));

        let author: Author =
            serde_json::from_value(json!({ "uid": "a1", "title": "Mia" })).unwrap();
        let out = html(render(&b, Some(&LoadState::Ready(author))).unwrap());
        assert!(out.contains(">Mia</h3>"));
    }

    #[test]
    fn no_candidate_renders_nothing() {
        let b = block(json!({ "author": [] }));
        assert!(render(&b, None).unwrap().is_none());
    }
}
