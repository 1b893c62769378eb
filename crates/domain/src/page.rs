use crate::{
    block::ContentBlock,
    content::{Author, Product, Seo},
    de::null_as_default,
    edit::EditMeta,
};
use serde::Deserialize;
use std::{collections::BTreeMap, fmt};

/// Which block-driven content type a page was fetched as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    #[default]
    Homepage,
    ProductListing,
}

impl PageKind {
    pub fn content_type(self) -> &'static str {
        match self {
            PageKind::Homepage => "homepage",
            PageKind::ProductListing => "product_listing_page",
        }
    }
}

/// A block-driven page (homepage or product listing page).
///
/// `page_components` is in authored order, which is rendering order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_components: Vec<ContentBlock>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
    #[serde(skip)]
    pub kind: PageKind,
}

// ─────────────────────────────────────────────────────────────────────────────
// Routes
// ─────────────────────────────────────────────────────────────────────────────

/// What the current route parameter asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Listing(String),
    Product(String),
}

impl Route {
    /// `None` for an absent or root-path parameter: redirect home.
    pub fn listing(param: Option<&str>) -> Option<Self> {
        normalize_param(param).map(Route::Listing)
    }

    /// `None` for an absent or root-path parameter: redirect home.
    pub fn product(param: Option<&str>) -> Option<Self> {
        normalize_param(param).map(Route::Product)
    }

    /// Parse a site path back into a route (`/`, `/<slug>`,
    /// `/product-listing/<slug>`, `/product/<uid>`).
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Home);
        }

        let mut parts = trimmed.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some("product"), rest) => Route::product(rest),
            (Some("product-listing"), rest) => Route::listing(rest),
            (Some(slug), None) => Route::listing(Some(slug)),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_owned(),
            Route::Listing(slug) => format!("/product-listing/{}", slug),
            Route::Product(uid) => format!("/product/{}", uid),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn normalize_param(param: Option<&str>) -> Option<String> {
    let p = param?.trim().trim_matches('/');
    (!p.is_empty()).then(|| p.to_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Page state
// ─────────────────────────────────────────────────────────────────────────────

/// State of something a component fetches for itself.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Failed,
    Ready(T),
}

/// Component-local artist lookups, keyed by product module index.
pub type ArtistSlots = BTreeMap<usize, LoadState<Author>>;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadedContent {
    Blocks(Page),
    Product {
        product: Product,
        artists: ArtistSlots,
    },
}

impl LoadedContent {
    pub fn title(&self) -> &str {
        match self {
            LoadedContent::Blocks(page) => &page.title,
            LoadedContent::Product { product, .. } => &product.title,
        }
    }

    pub fn seo(&self) -> Option<&Seo> {
        match self {
            LoadedContent::Blocks(page) => page.seo.as_ref(),
            LoadedContent::Product { .. } => None,
        }
    }
}

/// Page-level state, per route: `Idle → Loading → {Loaded, NotFound, Error}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageState {
    #[default]
    Idle,
    Loading {
        route: Route,
    },
    Loaded {
        route: Route,
        content: LoadedContent,
    },
    NotFound {
        route: Route,
    },
    Error {
        route: Route,
        message: String,
    },
}

impl PageState {
    pub fn route(&self) -> Option<&Route> {
        match self {
            PageState::Idle => None,
            PageState::Loading { route }
            | PageState::Loaded { route, .. }
            | PageState::NotFound { route }
            | PageState::Error { route, .. } => Some(route),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            PageState::Loaded { .. } | PageState::NotFound { .. } | PageState::Error { .. }
        )
    }
}
