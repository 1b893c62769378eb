// crates/adapt/src/gateway/fetch.rs

//! Typed lookups on top of [`ContentGateway`].

use super::{ContentGateway, GatewayError};
use crate::{artist::pending_artists, resolve::resolve_blocks};
use domain::{
    content::{Author, Product},
    page::{LoadedContent, Page, PageKind, Route},
    reference::Entry,
};
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use tracing::debug;

fn decode<T: DeserializeOwned>(
    content_type: &str,
    raw: Option<Json>,
) -> Result<Option<T>, GatewayError> {
    raw.map(|v| serde_json::from_value(v).map_err(|e| GatewayError::decode(content_type, e)))
        .transpose()
}

/// One linkable entry by uid, with references expanded.
pub async fn fetch_entry<T: Entry>(
    gateway: &dyn ContentGateway,
    uid: &str,
) -> Result<Option<T>, GatewayError> {
    let raw = gateway.fetch_by_key(T::CONTENT_TYPE, uid, true).await?;
    decode(T::CONTENT_TYPE, raw)
}

pub async fn fetch_homepage(gateway: &dyn ContentGateway) -> Result<Option<Page>, GatewayError> {
    let ct = PageKind::Homepage.content_type();
    let raw = gateway.fetch_singleton(ct, true).await?;
    Ok(decode::<Page>(ct, raw)?.map(|mut page| {
        page.kind = PageKind::Homepage;
        page
    }))
}

/// URL spellings a listing page may have been authored with, in lookup order.
pub fn slug_variations(slug: &str) -> [String; 3] {
    [format!("/{slug}"), slug.to_owned(), format!("/{slug}/")]
}

/// The listing page whose `url` matches `slug`; the first spelling that hits wins.
pub async fn fetch_listing_page(
    gateway: &dyn ContentGateway,
    slug: &str,
) -> Result<Option<Page>, GatewayError> {
    let ct = PageKind::ProductListing.content_type();
    for candidate in slug_variations(slug) {
        if let Some(raw) = gateway.fetch_by_slug(ct, &candidate, true).await? {
            let mut page: Page =
                serde_json::from_value(raw).map_err(|e| GatewayError::decode(ct, e))?;
            page.kind = PageKind::ProductListing;
            return Ok(Some(page));
        }
        debug!("no `{}` entry at url {:?}", ct, candidate);
    }
    Ok(None)
}

pub async fn fetch_product(
    gateway: &dyn ContentGateway,
    uid: &str,
) -> Result<Option<Product>, GatewayError> {
    fetch_entry(gateway, uid).await
}

pub async fn fetch_author(
    gateway: &dyn ContentGateway,
    uid: &str,
) -> Result<Option<Author>, GatewayError> {
    fetch_entry(gateway, uid).await
}

/// Everything the route needs before it can be committed.
///
/// Block pages come back with their references resolved. Product pages come
/// back with a `Loading` slot for every featured artist that still has to be
/// fetched; those load on their own afterwards.
#[tracing::instrument(skip_all, fields(route = %route))]
pub async fn fetch_page(
    gateway: &dyn ContentGateway,
    route: &Route,
) -> Result<Option<LoadedContent>, GatewayError> {
    let page = match route {
        Route::Home => fetch_homepage(gateway).await?,
        Route::Listing(slug) => fetch_listing_page(gateway, slug).await?,
        Route::Product(uid) => {
            return Ok(fetch_product(gateway, uid).await?.map(|product| {
                let artists = pending_artists(&product);
                LoadedContent::Product { product, artists }
            }));
        }
    };

    let Some(mut page) = page else {
        return Ok(None);
    };
    page.page_components = resolve_blocks(gateway, page.page_components).await;
    Ok(Some(LoadedContent::Blocks(page)))
}
