// crates/adapt/src/artist.rs

//! Component-local loading of featured artists on product pages.
//!
//! Unlike block references, these are not resolved before the page commits.
//! Each featured-artist module whose candidate is a stub gets its own slot,
//! keyed by module position, that moves from `Loading` to `Ready` or `Failed`
//! on its own schedule.

use crate::gateway::{fetch::fetch_author, ContentGateway};
use domain::{
    block::ProductModule,
    content::{Author, Product},
    page::{ArtistSlots, LoadState},
    reference::Reference,
};
use futures::future::join_all;
use tracing::warn;

/// `(module position, author uid)` for every featured artist still to fetch.
pub fn artist_stubs(product: &Product) -> Vec<(usize, String)> {
    product
        .modular_blocks
        .iter()
        .enumerate()
        .filter_map(|(position, module)| match module {
            ProductModule::FeaturedArtist(block) => match block.artist() {
                Some(Reference::Stub { uid }) => Some((position, uid.clone())),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Every slot a product page starts with: all `Loading`.
pub fn pending_artists(product: &Product) -> ArtistSlots {
    artist_stubs(product)
        .into_iter()
        .map(|(position, _)| (position, LoadState::Loading))
        .collect()
}

/// Fetch one artist. Never fails: problems end in `Failed`.
pub async fn load_artist(gateway: &dyn ContentGateway, uid: &str) -> LoadState<Author> {
    match fetch_author(gateway, uid).await {
        Ok(Some(author)) => LoadState::Ready(author),
        Ok(None) => {
            warn!("featured artist {} not found", uid);
            LoadState::Failed
        }
        Err(e) => {
            warn!("failed to load featured artist {}: {}", uid, e);
            LoadState::Failed
        }
    }
}

/// Load every pending artist of `product` concurrently.
pub async fn load_artists(gateway: &dyn ContentGateway, product: &Product) -> ArtistSlots {
    let loads = artist_stubs(product).into_iter().map(|(position, uid)| async move {
        (position, load_artist(gateway, &uid).await)
    });
    join_all(loads).await.into_iter().collect()
}
