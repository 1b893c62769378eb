// crates/adapt/src/resolve.rs

//! Reference resolution for a page's block list.
//!
//! Every stub inside a block's reference list is fetched by uid, all of a
//! block's stubs at once, and swapped in where the fetch succeeds. A stub
//! whose fetch fails or finds nothing stays a stub; renderers skip it.

use crate::gateway::{fetch::fetch_entry, ContentGateway};
use domain::{
    block::ContentBlock,
    reference::{Entry, Reference},
};
use futures::future::join_all;
use tracing::{debug, warn};

/// Resolve the stubs of every block. Order and shape are preserved; blocks
/// without stubs pass through untouched.
pub async fn resolve_blocks(
    gateway: &dyn ContentGateway,
    blocks: Vec<ContentBlock>,
) -> Vec<ContentBlock> {
    join_all(blocks.into_iter().map(|b| resolve_block(gateway, b))).await
}

async fn resolve_block(gateway: &dyn ContentGateway, block: ContentBlock) -> ContentBlock {
    match block {
        ContentBlock::HeroBanner(mut b) => {
            b.hero_banner = resolve_list(gateway, b.hero_banner).await;
            ContentBlock::HeroBanner(b)
        }
        ContentBlock::ProductGrid(mut b) => {
            if let Some(list) = b.product.take() {
                b.product = Some(resolve_list(gateway, list).await);
            }
            ContentBlock::ProductGrid(b)
        }
        ContentBlock::Widget(mut b) => {
            b.related_products = resolve_list(gateway, b.related_products).await;
            ContentBlock::Widget(b)
        }
        ContentBlock::ContactUs(mut b) => {
            b.reference = resolve_list(gateway, b.reference).await;
            ContentBlock::ContactUs(b)
        }
        ContentBlock::FromBlog(mut b) => {
            b.featured_blogs = resolve_list(gateway, b.featured_blogs).await;
            ContentBlock::FromBlog(b)
        }
        ContentBlock::OurTeam(mut b) => {
            b.our_team = resolve_list(gateway, b.our_team).await;
            ContentBlock::OurTeam(b)
        }
        other => other,
    }
}

/// Swap every stub in `list` for its full entry, fetching all stubs
/// concurrently.
pub async fn resolve_list<T: Entry + Send>(
    gateway: &dyn ContentGateway,
    list: Vec<Reference<T>>,
) -> Vec<Reference<T>> {
    if list.iter().all(|r| !r.is_stub()) {
        return list;
    }

    join_all(list.into_iter().map(|r| resolve_one(gateway, r))).await
}

async fn resolve_one<T: Entry + Send>(
    gateway: &dyn ContentGateway,
    reference: Reference<T>,
) -> Reference<T> {
    let Reference::Stub { uid } = reference else {
        return reference;
    };

    match fetch_entry::<T>(gateway, &uid).await {
        Ok(Some(entry)) => Reference::Full(entry),
        Ok(None) => {
            debug!("`{}` reference {} not found; keeping stub", T::CONTENT_TYPE, uid);
            Reference::Stub { uid }
        }
        Err(e) => {
            warn!("failed to resolve `{}` reference {}: {}", T::CONTENT_TYPE, uid, e);
            Reference::Stub { uid }
        }
    }
}
