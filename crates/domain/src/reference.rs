// crates/domain/src/reference.rs

//! Links from one content entry to another.
//!
//! A link arrives either as a bare identifier (`{"uid": "..."}`) or as the
//! full entity. Which one it is gets decided exactly once, here, by looking
//! for the content-bearing `title` field. Everything downstream matches on
//! [`Reference`] instead of probing JSON.

use serde::{
    de::{DeserializeOwned, Deserializer, Error as _},
    Deserialize,
};
use serde_json::Value as Json;

/// A content entry that other entries can link to.
pub trait Entry: DeserializeOwned {
    /// Content type uid used when fetching the full entity by key.
    const CONTENT_TYPE: &'static str;

    fn uid(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    Stub { uid: String },
    Full(T),
}

impl<T: Entry> Reference<T> {
    pub fn stub(uid: impl Into<String>) -> Self {
        Reference::Stub { uid: uid.into() }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Reference::Stub { .. })
    }

    pub fn uid(&self) -> &str {
        match self {
            Reference::Stub { uid } => uid,
            Reference::Full(entry) => entry.uid(),
        }
    }

    pub fn as_full(&self) -> Option<&T> {
        match self {
            Reference::Full(entry) => Some(entry),
            Reference::Stub { .. } => None,
        }
    }
}

/// True when a raw reference object carries content and not just an id.
pub fn is_populated(raw: &Json) -> bool {
    raw.get("title").is_some_and(|t| !t.is_null())
}

impl<'de, T: Entry> Deserialize<'de> for Reference<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Json::deserialize(deserializer)?;
        if !raw.is_object() {
            return Err(D::Error::custom("reference must be an object"));
        }

        if is_populated(&raw) {
            return T::deserialize(raw).map(Reference::Full).map_err(D::Error::custom);
        }

        match raw.get("uid").and_then(Json::as_str) {
            Some(uid) if !uid.is_empty() => Ok(Reference::stub(uid)),
            _ => Err(D::Error::custom("reference has neither uid nor title")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Author;
    use serde_json::json;

    #[test]
    fn uid_only_is_a_stub() {
        let r: Reference<Author> = serde_json::from_value(json!({ "uid": "a1" })).unwrap();
        assert!(r.is_stub());
        assert_eq!(r.uid(), "a1");
        assert!(r.as_full().is_none());
    }

    #[test]
    fn uid_with_title_is_populated() {
        let r: Reference<Author> =
            serde_json::from_value(json!({ "uid": "a1", "title": "X" })).unwrap();
        assert!(!r.is_stub());
        assert_eq!(r.as_full().map(|a| a.title.as_str()), Some("X"));
    }

    #[test]
    fn null_title_counts_as_stub() {
        let r: Reference<Author> =
            serde_json::from_value(json!({ "uid": "a1", "title": null, "_content_type_uid": "author" }))
                .unwrap();
        assert!(r.is_stub());
    }

    #[test]
    fn reference_without_uid_or_title_is_rejected() {
        let r = serde_json::from_value::<Reference<Author>>(json!({ "bio": "?" }));
        assert!(r.is_err());
        let r = serde_json::from_value::<Reference<Author>>(json!("a1"));
        assert!(r.is_err());
    }
}
