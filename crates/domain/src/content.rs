use crate::{
    de::{lenient_option, null_as_default},
    edit::EditMeta,
    reference::{Entry, Reference},
};
use serde::Deserialize;
use serde_json::Value as Json;

/// Uploaded media (image, icon) referenced from an entry.
///
/// A missing `url` means "no image": renderers show nothing, not an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct File {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl File {
    pub fn src(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    /// Some link fields are authored with `url` instead of `href`.
    #[serde(default)]
    pub url: Option<String>,
}

impl Link {
    pub fn target(&self) -> Option<&str> {
        self.href
            .as_deref()
            .filter(|h| !h.is_empty())
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
    }

    pub fn label(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub enable_search_indexing: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn text_class(self) -> &'static str {
        match self {
            Alignment::Left => "text-left",
            Alignment::Center => "text-center",
            Alignment::Right => "text-right",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Linkable entries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroBanner {
    #[serde(default)]
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub banner_image: Option<File>,
    #[serde(default)]
    pub background_color: Option<Color>,
    #[serde(default)]
    pub text_color: Option<Color>,
    #[serde(default)]
    pub banner_description: Option<String>,
    #[serde(default)]
    pub call_to_action: Option<Link>,
    #[serde(rename = "is_banner_image_full_width_", default)]
    pub full_width: bool,
    #[serde(default, deserialize_with = "lenient_option")]
    pub banner_image_alignment: Option<Alignment>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub content_title_alignment: Option<Alignment>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl Entry for HeroBanner {
    const CONTENT_TYPE: &'static str = "hero_banner";

    fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured_image: Vec<File>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub call_to_action: Option<Link>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modular_blocks: Vec<crate::block::ProductModule>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl Product {
    /// Where a product card links to: the authored url, else the detail route.
    pub fn href(&self) -> String {
        match self.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.to_owned(),
            None => format!("/product/{}", self.uid),
        }
    }
}

impl Entry for Product {
    const CONTENT_TYPE: &'static str = "product";

    fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub picture: Option<File>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl Entry for Author {
    const CONTENT_TYPE: &'static str = "author";

    fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Authored as numbers, sometimes as strings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_number: Vec<Json>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl Contact {
    pub fn phone_numbers(&self) -> Vec<String> {
        self.contact_number
            .iter()
            .filter_map(|n| match n {
                Json::String(s) if !s.is_empty() => Some(s.clone()),
                Json::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl Entry for Contact {
    const CONTENT_TYPE: &'static str = "contact";

    fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlogPost {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub featured_image: Option<File>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl Entry for BlogPost {
    const CONTENT_TYPE: &'static str = "blog_post";

    fn uid(&self) -> &str {
        &self.uid
    }
}

/// A product listing page as seen from a widget: just enough to link to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingLink {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Entry for ListingLink {
    const CONTENT_TYPE: &'static str = "product_listing_page";

    fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl Entry for Team {
    const CONTENT_TYPE: &'static str = "our_team";

    fn uid(&self) -> &str {
        &self.uid
    }
}

/// Reference lists arrive in the CMS wire shape: always an array.
pub type References<T> = Vec<Reference<T>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn link_prefers_href_then_url() {
        let l: Link = serde_json::from_value(json!({ "title": "Go", "url": "/b" })).unwrap();
        assert_eq!(l.target(), Some("/b"));

        let l: Link =
            serde_json::from_value(json!({ "title": "Go", "href": "/a", "url": "/b" })).unwrap();
        assert_eq!(l.target(), Some("/a"));

        let l: Link = serde_json::from_value(json!({ "title": "", "href": "" })).unwrap();
        assert_eq!(l.target(), None);
        assert_eq!(l.label(), None);
    }

    #[test]
    fn blank_or_unknown_alignment_falls_back_to_none() {
        let h: HeroBanner = serde_json::from_value(json!({
            "uid": "h1",
            "title": "Sale",
            "content_title_alignment": "",
            "banner_image_alignment": "Diagonal"
        }))
        .unwrap();
        assert_eq!(h.content_title_alignment, None);
        assert_eq!(h.banner_image_alignment, None);

        let h: HeroBanner = serde_json::from_value(json!({
            "uid": "h1",
            "title": "Sale",
            "content_title_alignment": "Right",
            "banner_image_alignment": null
        }))
        .unwrap();
        assert_eq!(h.content_title_alignment, Some(Alignment::Right));
        assert_eq!(h.banner_image_alignment, None);
    }

    #[test]
    fn file_without_url_has_no_src() {
        let f: File = serde_json::from_value(json!({ "uid": "f1", "title": "x" })).unwrap();
        assert_eq!(f.src(), None);
    }

    #[test]
    fn product_defaults_to_detail_route() {
        let p: Product = serde_json::from_value(json!({
            "uid": "p1",
            "title": "Guitar",
            "featured_image": null,
            "modular_blocks": null
        }))
        .unwrap();
        assert_eq!(p.href(), "/product/p1");
        assert!(p.featured_image.is_empty());
        assert!(p.price.is_none());
    }

    #[test]
    fn contact_numbers_accept_numbers_and_strings() {
        let c: Contact = serde_json::from_value(json!({
            "uid": "c1",
            "title": "HQ",
            "contact_number": [5551234, "555-9999", null]
        }))
        .unwrap();
        assert_eq!(c.phone_numbers(), vec!["5551234", "555-9999"]);
    }
}
