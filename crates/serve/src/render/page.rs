// crates/serve/src/render/page.rs

//! Whole-page views: one `<main>` per [`PageState`], plus the document shell.

use super::{
    dispatch::{blocks_container, render_blocks, render_product_modules},
    error::RenderError,
    node::Element,
    sections::{image, present, product::price},
    template::{LiveBootstrap, PageShell, ShellModel},
};
use domain::{
    content::Product,
    page::{ArtistSlots, LoadedContent, Page, PageState, Route},
};

const BUTTON_CLASS: &str =
    "mt-4 inline-block bg-blue-600 hover:bg-blue-700 text-white font-semibold px-6 py-3 rounded-lg";

/// The `<main>` element for a page state. Never fails: block-level problems
/// are already contained by the dispatcher.
pub fn render_main(state: &PageState) -> Element {
    match state {
        PageState::Idle | PageState::Loading { .. } => loading_view(state.route()),
        PageState::Loaded { content, .. } => match content {
            LoadedContent::Blocks(page) => blocks_view(page),
            LoadedContent::Product { product, artists } => product_view(product, artists),
        },
        PageState::NotFound { route } => not_found_view(route),
        PageState::Error { route, message } => error_view(route, message),
    }
}

/// A complete HTML document for a page state.
pub fn render_document(
    shell: &PageShell,
    state: &PageState,
    live: Option<&LiveBootstrap>,
) -> Result<String, RenderError> {
    let body = render_main(state).into_node().to_html();

    let model = match state {
        PageState::Loaded { content, .. } => {
            ShellModel::new(content.title(), body).with_seo(content.seo())
        }
        PageState::NotFound { .. } => ShellModel::new("Not found", body),
        PageState::Error { .. } => ShellModel::new("Error", body),
        PageState::Idle | PageState::Loading { .. } => ShellModel::new("Loading", body),
    };

    shell.render(&model.with_live(live)?)
}

fn main_el() -> Element {
    Element::new("main").class("min-h-screen bg-white")
}

fn centered(inner: Element) -> Element {
    Element::new("main")
        .class("min-h-screen flex items-center justify-center")
        .child(inner)
}

fn blocks_view(page: &Page) -> Element {
    let rendered = render_blocks(&page.page_components, page.kind);
    main_el()
        .attr("data-page", page.kind.content_type())
        .child(blocks_container(rendered, page.edit.field("page_components")))
}

fn loading_view(route: Option<&Route>) -> Element {
    let what = match route {
        Some(Route::Home) | None => "Loading homepage...",
        Some(Route::Listing(_)) => "Loading products...",
        Some(Route::Product(_)) => "Loading...",
    };
    centered(
        Element::new("div")
            .class("text-center")
            .attr("aria-busy", "true")
            .child(
                Element::new("h2")
                    .class("text-2xl font-semibold text-gray-700")
                    .text(what),
            )
            .child(
                Element::new("p")
                    .class("text-gray-500 mt-2")
                    .text("Fetching content from the CMS"),
            ),
    )
}

const HOME_STEPS: &[&str] = &[
    "Open the CMS",
    "Navigate to Content → Homepage",
    "Click + Add Entry and fill in the Title field",
    "Save and publish the entry",
    "Refresh this page",
];

const LISTING_STEPS: &[&str] = &[
    "Open the CMS",
    "Navigate to Content → Product Listing Page",
    "Create or publish an entry with a matching URL",
    "Refresh this page",
];

fn not_found_view(route: &Route) -> Element {
    let (heading, message, steps) = match route {
        Route::Home => (
            "Homepage Not Found",
            "No homepage content found. Please create a Homepage entry in the CMS.".to_owned(),
            HOME_STEPS,
        ),
        Route::Listing(slug) => (
            "Product Listing Page Not Found",
            format!(
                "No product listing page found for slug: \"{slug}\". \
                 Please check the URL field of the entry. Tried: /{slug}, {slug}, /{slug}/"
            ),
            LISTING_STEPS,
        ),
        Route::Product(_) => (
            "Product Not Found",
            "The product you're looking for doesn't exist.".to_owned(),
            &[][..],
        ),
    };

    let steps = (!steps.is_empty()).then(|| {
        Element::new("div")
            .class("bg-yellow-50 border border-yellow-200 rounded-lg p-6 text-left")
            .child(
                Element::new("h3")
                    .class("font-semibold text-gray-900 mb-2")
                    .text("Quick Fix:"),
            )
            .child(
                Element::new("ol")
                    .class("list-decimal list-inside space-y-2 text-gray-700")
                    .children(steps.iter().map(|s| Element::new("li").text(*s))),
            )
    });

    centered(
        Element::new("div")
            .class("page-not-found text-center max-w-2xl mx-auto p-8")
            .child(
                Element::new("h1")
                    .class("text-3xl font-bold text-gray-700 mb-4")
                    .text(heading),
            )
            .child(
                Element::new("p")
                    .class("text-lg text-gray-700 mb-6")
                    .text(message),
            )
            .child_opt(steps)
            .child(
                Element::new("a")
                    .attr("href", "/")
                    .class(BUTTON_CLASS)
                    .text("Go to Homepage"),
            ),
    )
}

fn error_view(route: &Route, message: &str) -> Element {
    let what = match route {
        Route::Home => "homepage",
        Route::Listing(_) => "product listing page",
        Route::Product(_) => "product",
    };

    centered(
        Element::new("div")
            .class("page-error text-center max-w-2xl mx-auto p-8")
            .child(
                Element::new("h1")
                    .class("text-3xl font-bold text-red-600 mb-4")
                    .text("Failed to Load Content"),
            )
            .child(
                Element::new("p")
                    .class("text-lg text-gray-700 mb-6")
                    .text(format!(
                        "Failed to load {what} content. Check your CMS configuration \
                         (API key, delivery token, environment, region)."
                    )),
            )
            .child(
                Element::new("pre")
                    .class("text-sm text-left bg-gray-100 p-4 rounded whitespace-pre-wrap")
                    .text(message),
            ),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Product detail
// ─────────────────────────────────────────────────────────────────────────────

fn product_view(product: &Product, artists: &ArtistSlots) -> Element {
    let breadcrumb = Element::new("div")
        .class("bg-gray-50 py-4 border-b")
        .child(
            Element::new("nav")
                .class("container mx-auto px-4 flex items-center space-x-2 text-sm text-gray-600")
                .attr("aria-label", "Breadcrumb")
                .child(Element::new("a").attr("href", "/").text("Home"))
                .child(Element::new("span").text("/"))
                .child(
                    Element::new("span")
                        .class("text-gray-900")
                        .text(&product.title),
                ),
        );

    let thumbnails = (product.featured_image.len() > 1).then(|| {
        Element::new("div").class("grid grid-cols-4 gap-4").children(
            product
                .featured_image
                .iter()
                .enumerate()
                .filter_map(|(i, file)| {
                    image(
                        Some(file),
                        &format!("{} - Image {}", product.title, i + 1),
                        "w-full aspect-square object-cover rounded-lg",
                    )
                }),
        )
    });

    let gallery = Element::new("div")
        .class("space-y-4")
        .child_opt(
            image(
                product.featured_image.first(),
                &product.title,
                "w-full aspect-square object-cover rounded-lg",
            )
            .map(|img| {
                Element::new("div")
                    .class("relative bg-gray-100 rounded-lg overflow-hidden")
                    .child(img)
            }),
        )
        .child_opt(thumbnails);

    let description = present(product.description.as_ref()).map(|d| {
        Element::new("div")
            .class("prose max-w-none text-gray-700 border-t border-b border-gray-200 py-6")
            .edit(product.edit.field("description"))
            .child(
                Element::new("p")
                    .class("text-lg whitespace-pre-wrap")
                    .text(d),
            )
    });

    let cta = product.call_to_action.as_ref().and_then(|link| {
        let href = link.target()?;
        let label = link.label()?;
        Some(
            Element::new("a")
                .attr("href", href)
                .class("block w-full bg-blue-600 text-white text-center font-semibold px-8 py-4 rounded-lg text-lg")
                .edit(product.edit.field("call_to_action"))
                .text(label),
        )
    });

    let info = Element::new("div")
        .class("space-y-6")
        .child(
            Element::new("div")
                .child(
                    Element::new("h1")
                        .class("text-4xl md:text-5xl font-bold text-gray-900 mb-4")
                        .edit(product.edit.field("title"))
                        .text(&product.title),
                )
                .child_opt(price(product, "text-4xl font-bold text-gray-900")),
        )
        .child_opt(description)
        .child_opt(cta)
        .child(details_table(product));

    let modules = render_product_modules(&product.modular_blocks, artists);

    main_el()
        .attr("data-page", "product")
        .child(breadcrumb)
        .child(
            Element::new("div")
                .class("container mx-auto px-4 py-12")
                .edit(product.edit.entity())
                .child(
                    Element::new("div")
                        .class("grid grid-cols-1 lg:grid-cols-2 gap-12")
                        .child(gallery)
                        .child(info),
                ),
        )
        .child(
            Element::new("div")
                .class("product-modules")
                .edit(product.edit.field("modular_blocks"))
                .children(modules.into_iter().filter_map(|m| m.into_node())),
        )
}

fn details_table(product: &Product) -> Element {
    let row = |label: &str, value: &str| {
        Element::new("div")
            .class("flex justify-between text-sm")
            .child(Element::new("span").class("text-gray-600").text(label))
            .child(
                Element::new("span")
                    .class("font-medium text-gray-900")
                    .text(value),
            )
    };

    Element::new("div")
        .class("bg-gray-50 p-6 rounded-lg space-y-3")
        .child(
            Element::new("h3")
                .class("font-semibold text-lg text-gray-900 mb-4")
                .text("Product Details"),
        )
        .child(row("Product ID:", &product.uid))
        .child_opt(present(product.url.as_ref()).map(|url| row("URL:", url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::page::{LoadState, PageKind};
    use serde_json::json;

    fn page(v: serde_json::Value, kind: PageKind) -> Page {
        let mut p: Page = serde_json::from_value(v).unwrap();
        p.kind = kind;
        p
    }

    fn loaded(content: LoadedContent, route: Route) -> PageState {
        PageState::Loaded { route, content }
    }

    #[test]
    fn empty_page_carries_the_marker_and_components_token() {
        let p = page(
            json!({
                "uid": "h1",
                "title": "Home",
                "page_components": [],
                "$": { "page_components": { "data-cslp": "homepage.h1.en-us.page_components" } }
            }),
            PageKind::Homepage,
        );
        let html = render_main(&loaded(LoadedContent::Blocks(p), Route::Home))
            .into_node()
            .to_html();
        assert!(html.contains(crate::render::dispatch::EMPTY_BLOCK_PARENT_CLASS));
        assert!(html.contains(r#"data-cslp="homepage.h1.en-us.page_components""#));
    }

    #[test]
    fn not_found_and_error_render_distinctly() {
        let nf = render_main(&PageState::NotFound {
            route: Route::Listing("drums".into()),
        })
        .into_node()
        .to_html();
        assert!(nf.contains("page-not-found"));
        assert!(nf.contains("slug: &quot;drums&quot;") || nf.contains("slug: \"drums\""));

        let err = render_main(&PageState::Error {
            route: Route::Home,
            message: "status 401".into(),
        })
        .into_node()
        .to_html();
        assert!(err.contains("page-error"));
        assert!(err.contains("Check your CMS configuration"));
        assert!(err.contains("status 401"));
        assert!(!err.contains("page-not-found"));
    }

    #[test]
    fn product_page_renders_detail_and_modules() {
        let product: Product = serde_json::from_value(json!({
            "uid": "p1",
            "title": "Kit",
            "price": 999.0,
            "featured_image": [ { "url": "/a.png" }, { "url": "/b.png" } ],
            "modular_blocks": [
                { "featured_artist": { "author": [{ "uid": "a1" }] } }
            ],
            "$": { "price": { "data-cslp": "product.p1.en-us.price" } }
        }))
        .unwrap();

        let mut artists = ArtistSlots::new();
        artists.insert(0, LoadState::Loading);

        let html = render_main(&loaded(
            LoadedContent::Product { product, artists },
            Route::Product("p1".into()),
        ))
        .into_node()
        .to_html();

        assert!(html.contains(">Kit</h1>"));
        assert!(html.contains(r#"data-cslp="product.p1.en-us.price">$999.00</span>"#));
        assert!(html.contains("Kit - Image 2"));
        assert!(html.contains("Loading artist information..."));
        assert!(html.contains("Product ID:"));
    }

    #[test]
    fn document_uses_page_title_and_seo() {
        let p = page(
            json!({
                "uid": "h1",
                "title": "Home",
                "seo": { "meta_title": "Music Shop", "enable_search_indexing": true }
            }),
            PageKind::Homepage,
        );
        let shell = PageShell::new().unwrap();
        let html =
            render_document(&shell, &loaded(LoadedContent::Blocks(p), Route::Home), None).unwrap();
        assert!(html.contains("<title>Music Shop</title>"));
        assert!(!html.contains("noindex"));
        assert!(html.contains("<main"));
    }
}
