// crates/adapt/src/gateway/mod.rs

//! Port to the remote content source.
//!
//! The trait speaks raw JSON so implementations stay ignorant of the content
//! model; typed decoding lives in [`fetch`].

pub mod contentstack;
pub mod editable;
pub mod error;
pub mod fetch;

pub use contentstack::ContentstackGateway;
pub use error::GatewayError;

use async_trait::async_trait;
use serde_json::Value as Json;

/// Fetches single entries. `Ok(None)` means "no such entry"; transport and
/// configuration problems are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// One entry by its unique identifier.
    async fn fetch_by_key(
        &self,
        content_type: &str,
        key: &str,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError>;

    /// First entry whose `url` field equals `slug`.
    async fn fetch_by_slug(
        &self,
        content_type: &str,
        slug: &str,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError>;

    /// First entry of a content type that holds a single entry.
    async fn fetch_singleton(
        &self,
        content_type: &str,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError>;
}
