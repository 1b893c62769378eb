// crates/domain/src/block.rs

//! Content blocks: the tagged elements of a page's component list.
//!
//! On the wire every block is an object keyed by its kind
//! (`{"section": {...}}`). Ingestion picks the first recognised key in
//! dispatch-table order and decodes only that payload, so one bad block turns
//! into [`ContentBlock::Malformed`] instead of failing the whole page.

use crate::{
    content::{
        Author, BlogPost, Contact, File, HeroBanner, Link, ListingLink, Product, References, Team,
    },
    de::null_as_default,
    edit::EditMeta,
};
use serde::{
    de::{DeserializeOwned, Deserializer},
    Deserialize,
};
use serde_json::{Map as JsonMap, Value as Json};
use std::fmt;
use tracing::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeroBannerBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_banner: References<HeroBanner>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductBlock {
    /// `None` when the list itself is absent or null: a malformed block.
    #[serde(default)]
    pub product: Option<References<Product>>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title_h2: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub call_to_action: Option<Link>,
    #[serde(default)]
    pub image: Option<File>,
    #[serde(default)]
    pub is_image_right_aligned: bool,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Bucket {
    #[serde(default)]
    pub title_h3: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<File>,
    #[serde(default)]
    pub icon: Option<File>,
    #[serde(default)]
    pub call_to_action: Option<Link>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionWithBuckets {
    #[serde(default)]
    pub title_h2: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tabular_buckets: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buckets: Vec<Bucket>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub card_title_h3: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub call_to_action: Option<Link>,
    #[serde(default)]
    pub image: Option<File>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionWithCards {
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub section_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

/// Section carrying author-supplied markup. The markup is untrusted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionWithHtmlCode {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_code: Option<String>,
    #[serde(rename = "is_html_code_left_aligned_", default)]
    pub left_aligned: bool,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WidgetBlock {
    #[serde(default)]
    pub title_h2: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_products: References<ListingLink>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactUsBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: References<Contact>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FromBlogBlock {
    #[serde(default)]
    pub title_h2: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured_blogs: References<BlogPost>,
    #[serde(default)]
    pub view_articles: Option<Link>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OurTeamBlock {
    #[serde(default)]
    pub title_h2: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub our_team: References<Team>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

// ─────────────────────────────────────────────────────────────────────────────
// Page blocks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    HeroBanner,
    ProductGrid,
    Section,
    SectionWithBuckets,
    SectionWithCards,
    SectionWithHtmlCode,
    Widget,
    ContactUs,
    FromBlog,
    OurTeam,
}

impl BlockTag {
    /// The dispatch table, in priority order.
    pub const ALL: [BlockTag; 10] = [
        BlockTag::HeroBanner,
        BlockTag::ProductGrid,
        BlockTag::Section,
        BlockTag::SectionWithBuckets,
        BlockTag::SectionWithCards,
        BlockTag::SectionWithHtmlCode,
        BlockTag::Widget,
        BlockTag::ContactUs,
        BlockTag::FromBlog,
        BlockTag::OurTeam,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::HeroBanner => "hero_banner",
            BlockTag::ProductGrid => "product",
            BlockTag::Section => "section",
            BlockTag::SectionWithBuckets => "section_with_buckets",
            BlockTag::SectionWithCards => "section_with_cards",
            BlockTag::SectionWithHtmlCode => "section_with_html_code",
            BlockTag::Widget => "widget",
            BlockTag::ContactUs => "contact_us",
            BlockTag::FromBlog => "from_blog",
            BlockTag::OurTeam => "our_team",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    HeroBanner(HeroBannerBlock),
    ProductGrid(ProductBlock),
    Section(Section),
    SectionWithBuckets(SectionWithBuckets),
    SectionWithCards(SectionWithCards),
    SectionWithHtmlCode(SectionWithHtmlCode),
    Widget(WidgetBlock),
    ContactUs(ContactUsBlock),
    FromBlog(FromBlogBlock),
    OurTeam(OurTeamBlock),
    /// A recognised tag whose payload could not be decoded.
    Malformed { tag: BlockTag, reason: String },
    /// No recognised tag: renders nothing.
    Empty,
}

impl ContentBlock {
    pub fn tag(&self) -> Option<BlockTag> {
        Some(match self {
            ContentBlock::HeroBanner(_) => BlockTag::HeroBanner,
            ContentBlock::ProductGrid(_) => BlockTag::ProductGrid,
            ContentBlock::Section(_) => BlockTag::Section,
            ContentBlock::SectionWithBuckets(_) => BlockTag::SectionWithBuckets,
            ContentBlock::SectionWithCards(_) => BlockTag::SectionWithCards,
            ContentBlock::SectionWithHtmlCode(_) => BlockTag::SectionWithHtmlCode,
            ContentBlock::Widget(_) => BlockTag::Widget,
            ContentBlock::ContactUs(_) => BlockTag::ContactUs,
            ContentBlock::FromBlog(_) => BlockTag::FromBlog,
            ContentBlock::OurTeam(_) => BlockTag::OurTeam,
            ContentBlock::Malformed { tag, .. } => *tag,
            ContentBlock::Empty => return None,
        })
    }

    fn decode(tag: BlockTag, payload: Json) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            BlockTag::HeroBanner => ContentBlock::HeroBanner(payload_from(payload)?),
            BlockTag::ProductGrid => ContentBlock::ProductGrid(payload_from(payload)?),
            BlockTag::Section => ContentBlock::Section(payload_from(payload)?),
            BlockTag::SectionWithBuckets => ContentBlock::SectionWithBuckets(payload_from(payload)?),
            BlockTag::SectionWithCards => ContentBlock::SectionWithCards(payload_from(payload)?),
            BlockTag::SectionWithHtmlCode => {
                ContentBlock::SectionWithHtmlCode(payload_from(payload)?)
            }
            BlockTag::Widget => ContentBlock::Widget(payload_from(payload)?),
            BlockTag::ContactUs => ContentBlock::ContactUs(payload_from(payload)?),
            BlockTag::FromBlog => ContentBlock::FromBlog(payload_from(payload)?),
            BlockTag::OurTeam => ContentBlock::OurTeam(payload_from(payload)?),
        })
    }

    /// Build a block from its wire object. Never fails: bad payloads become
    /// `Malformed`, unknown kinds become `Empty`.
    pub fn from_wire(mut obj: JsonMap<String, Json>) -> Self {
        let mut found = BlockTag::ALL
            .into_iter()
            .filter(|tag| obj.contains_key(tag.as_str()));

        let Some(tag) = found.next() else {
            debug!(
                "block carries no recognised tag (keys: {:?})",
                obj.keys().collect::<Vec<_>>()
            );
            return ContentBlock::Empty;
        };

        let extra: Vec<BlockTag> = found.collect();
        if !extra.is_empty() {
            warn!("block carries several tags; using `{}`, ignoring {:?}", tag, extra);
        }

        let payload = obj.remove(tag.as_str()).unwrap_or(Json::Null);
        if payload.is_null() {
            return ContentBlock::Malformed {
                tag,
                reason: format!("`{}` payload is null", tag),
            };
        }

        ContentBlock::decode(tag, payload).unwrap_or_else(|e| ContentBlock::Malformed {
            tag,
            reason: e.to_string(),
        })
    }
}

fn payload_from<T: DeserializeOwned>(payload: Json) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload)
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Json::deserialize(deserializer)? {
            Json::Object(obj) => Ok(ContentBlock::from_wire(obj)),
            other => {
                if !other.is_null() {
                    debug!("content block is not an object: {}", other);
                }
                Ok(ContentBlock::Empty)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product detail modules
// ─────────────────────────────────────────────────────────────────────────────

/// The featured-artist module links its author as a CMS reference field, which
/// is always an array of candidates; the first candidate is the artist.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeaturedArtistBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: References<Author>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

impl FeaturedArtistBlock {
    pub fn artist(&self) -> Option<&crate::reference::Reference<Author>> {
        self.author.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Specs {
    #[serde(default)]
    pub set_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductSpecsBlock {
    #[serde(default)]
    pub specs: Option<Specs>,
    #[serde(rename = "$", default)]
    pub edit: EditMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductModule {
    FeaturedArtist(FeaturedArtistBlock),
    ProductSpecs(ProductSpecsBlock),
    SectionWithCards(SectionWithCards),
    Malformed { tag: &'static str, reason: String },
    Empty,
}

impl ProductModule {
    const TAGS: [&'static str; 3] = ["featured_artist", "product_specs", "section_with_cards"];

    pub fn from_wire(mut obj: JsonMap<String, Json>) -> Self {
        let Some(tag) = Self::TAGS.into_iter().find(|t| obj.contains_key(*t)) else {
            return ProductModule::Empty;
        };

        let payload = obj.remove(tag).unwrap_or(Json::Null);
        let decoded = match tag {
            "featured_artist" => payload_from(payload).map(ProductModule::FeaturedArtist),
            "product_specs" => payload_from(payload).map(ProductModule::ProductSpecs),
            _ => payload_from(payload).map(ProductModule::SectionWithCards),
        };

        decoded.unwrap_or_else(|e| ProductModule::Malformed {
            tag,
            reason: e.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for ProductModule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Json::deserialize(deserializer)? {
            Json::Object(obj) => Ok(ProductModule::from_wire(obj)),
            _ => Ok(ProductModule::Empty),
        }
    }
}
