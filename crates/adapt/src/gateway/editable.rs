// crates/adapt/src/gateway/editable.rs

//! Edit tags for the visual editor.
//!
//! Every object inside an entry gets a `$` map: a `data-cslp` string naming
//! the object itself, and one `{"data-cslp": ...}` attribute set per field.
//! Tags read `<content_type>.<entry_uid>.<locale>.<field.path>`; array items
//! contribute their index to the path. Referenced entries embedded in the
//! tree restart the path from their own content type and uid.

use serde_json::{Map as JsonMap, Value as Json};

const TAG_ATTR: &str = "data-cslp";

pub fn annotate_editable(entry: &mut Json, content_type: &str, locale: &str) {
    let Json::Object(map) = entry else {
        return;
    };
    let Some(uid) = map.get("uid").and_then(Json::as_str).map(str::to_owned) else {
        return;
    };
    annotate_object(map, &format!("{content_type}.{uid}.{locale}"), "", locale);
}

fn annotate_value(value: &mut Json, prefix: &str, path: &str, locale: &str) {
    match value {
        Json::Object(map) => match embedded_entry(map) {
            Some((ct, uid)) => annotate_object(map, &format!("{ct}.{uid}.{locale}"), "", locale),
            None => annotate_object(map, prefix, path, locale),
        },
        Json::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                annotate_value(item, prefix, &join(path, &i.to_string()), locale);
            }
        }
        _ => {}
    }
}

fn annotate_object(map: &mut JsonMap<String, Json>, prefix: &str, path: &str, locale: &str) {
    let mut tags = JsonMap::new();
    tags.insert(TAG_ATTR.to_owned(), Json::String(join(prefix, path)));

    for (key, value) in map.iter_mut() {
        if skipped(key) {
            continue;
        }
        let field_path = join(path, key);
        let mut attrs = JsonMap::new();
        attrs.insert(TAG_ATTR.to_owned(), Json::String(join(prefix, &field_path)));
        tags.insert(key.clone(), Json::Object(attrs));
        annotate_value(value, prefix, &field_path, locale);
    }

    map.insert("$".to_owned(), Json::Object(tags));
}

/// `(content_type, uid)` of an embedded reference entry.
fn embedded_entry(map: &JsonMap<String, Json>) -> Option<(String, String)> {
    let ct = map.get("_content_type_uid")?.as_str()?;
    let uid = map.get("uid")?.as_str()?;
    Some((ct.to_owned(), uid.to_owned()))
}

fn skipped(key: &str) -> bool {
    key.starts_with('_') || matches!(key, "$" | "uid" | "ACL" | "publish_details")
}

fn join(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_owned(),
        (_, true) => a.to_owned(),
        _ => format!("{a}.{b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{block::ContentBlock, page::Page};
    use serde_json::json;

    #[test]
    fn fields_and_nested_objects_get_tags() {
        let mut entry = json!({
            "uid": "blt1",
            "title": "Home",
            "_version": 3,
            "seo": { "meta_title": "x" }
        });
        annotate_editable(&mut entry, "homepage", "en-us");

        assert_eq!(entry["$"]["data-cslp"], "homepage.blt1.en-us");
        assert_eq!(entry["$"]["title"]["data-cslp"], "homepage.blt1.en-us.title");
        assert!(entry["$"].get("_version").is_none());
        assert!(entry["$"].get("uid").is_none());
        assert_eq!(
            entry["seo"]["$"]["meta_title"]["data-cslp"],
            "homepage.blt1.en-us.seo.meta_title"
        );
    }

    #[test]
    fn array_items_use_their_index_and_references_restart() {
        let mut entry = json!({
            "uid": "blt1",
            "page_components": [
                { "section": { "title_h2": "a" } },
                { "product": { "product": [
                    { "uid": "p9", "_content_type_uid": "product", "title": "Kick" }
                ] } }
            ]
        });
        annotate_editable(&mut entry, "homepage", "en-us");

        assert_eq!(
            entry["page_components"][0]["section"]["$"]["title_h2"]["data-cslp"],
            "homepage.blt1.en-us.page_components.0.section.title_h2"
        );
        let product = &entry["page_components"][1]["product"]["product"][0];
        assert_eq!(product["$"]["data-cslp"], "product.p9.en-us");
        assert_eq!(product["$"]["title"]["data-cslp"], "product.p9.en-us.title");
    }

    #[test]
    fn annotated_entries_decode_with_edit_metadata() {
        let mut entry = json!({
            "uid": "blt1",
            "title": "Home",
            "page_components": [ { "section": { "title_h2": "a" } } ]
        });
        annotate_editable(&mut entry, "homepage", "en-us");

        let page: Page = serde_json::from_value(entry).unwrap();
        assert_eq!(
            page.edit.field("page_components").unwrap()["data-cslp"],
            "homepage.blt1.en-us.page_components"
        );
        match &page.page_components[0] {
            ContentBlock::Section(s) => assert_eq!(
                s.edit.field("title_h2").unwrap()["data-cslp"],
                "homepage.blt1.en-us.page_components.0.section.title_h2"
            ),
            other => panic!("unexpected block: {other:?}"),
        }
    }

    #[test]
    fn entries_without_uid_are_left_alone() {
        let mut entry = json!({ "title": "x" });
        annotate_editable(&mut entry, "homepage", "en-us");
        assert!(entry.get("$").is_none());
    }
}
