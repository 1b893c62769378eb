//! Inline-edit metadata (`$`) carried on content entities.
//!
//! When editing is enabled the content gateway attaches a `$` object to every
//! entity. String values in that object are attributes for the entity as a
//! whole; object values are attribute sets for one named field. Renderers only
//! ever read these attributes and copy them onto the element that shows the
//! entity or field.

use serde::{de::Deserializer, Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Attribute name/value pairs to spread onto one rendered element.
pub type EditAttrs = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditMeta {
    entity: EditAttrs,
    fields: BTreeMap<String, EditAttrs>,
}

impl EditMeta {
    pub fn is_empty(&self) -> bool {
        self.entity.is_empty() && self.fields.is_empty()
    }

    /// Attributes for the outermost element of the entity, if any were sent.
    pub fn entity(&self) -> Option<&EditAttrs> {
        (!self.entity.is_empty()).then_some(&self.entity)
    }

    /// Attributes for the element showing `field`, if any were sent.
    pub fn field(&self, field: &str) -> Option<&EditAttrs> {
        self.fields.get(field).filter(|attrs| !attrs.is_empty())
    }

    pub fn with_entity_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entity.insert(name.into(), value.into());
        self
    }

    pub fn with_field_attr(
        mut self,
        field: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(name.into(), value.into());
        self
    }
}

impl<'de> Deserialize<'de> for EditMeta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Json>::deserialize(deserializer)?;
        let mut meta = EditMeta::default();

        let Some(Json::Object(map)) = raw else {
            return Ok(meta);
        };

        for (key, value) in map {
            match value {
                Json::String(s) => {
                    meta.entity.insert(key, s);
                }
                Json::Object(attrs) => {
                    let attrs: EditAttrs = attrs
                        .into_iter()
                        .filter_map(|(name, v)| match v {
                            Json::String(s) => Some((name, s)),
                            _ => None,
                        })
                        .collect();
                    if !attrs.is_empty() {
                        meta.fields.insert(key, attrs);
                    }
                }
                // Numbers, arrays, null: not attribute material.
                _ => {}
            }
        }

        Ok(meta)
    }
}
