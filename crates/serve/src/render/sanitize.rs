// crates/serve/src/render/sanitize.rs

use super::error::RenderError;
use html_escape::decode_html_entities;
use lol_html::{doc_comments, element, html_content::Element, rewrite_str, RewriteStrSettings};

/// Elements removed together with everything inside them.
const DROPPED_ELEMENTS: &str = "script, style, iframe, object, embed, frame, frameset, \
                                link, meta, base, form, noscript, template, svg, math";

/// Attributes that carry URLs a browser may navigate to or execute.
const URL_ATTRIBUTES: [&str; 5] = ["href", "src", "action", "formaction", "xlink:href"];

/// Strip executable and otherwise unsafe constructs from author-supplied markup.
///
/// Benign formatting (paragraphs, lists, links, images, tables, inline styles
/// of text) passes through byte-for-byte.
pub fn sanitize_html(html: &str) -> Result<String, RenderError> {
    let element_content_handlers = vec![
        element!(DROPPED_ELEMENTS, |el| {
            el.remove();
            Ok(())
        }),
        element!("*", |el| {
            strip_unsafe_attributes(el);
            Ok(())
        }),
    ];

    let document_content_handlers = vec![doc_comments!(|c| {
        c.remove();
        Ok(())
    })];

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers,
            document_content_handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| RenderError::LolHtml(e.to_string()))
}

fn strip_unsafe_attributes(el: &mut Element) {
    let names: Vec<String> = el.attributes().iter().map(|a| a.name()).collect();

    for name in names {
        let lower = name.to_ascii_lowercase();
        // lol_html hands out the raw source text; the browser sees it decoded.
        let value = el
            .get_attribute(&name)
            .map(|v| decode_html_entities(&v).into_owned());
        let drop = lower.starts_with("on")
            || lower == "srcdoc"
            || lower == "style" && value.as_deref().is_some_and(is_style_script)
            || URL_ATTRIBUTES.contains(&lower.as_str())
                && value.as_deref().is_some_and(is_unsafe_url);

        if drop {
            el.remove_attribute(&name);
        }
    }
}

/// `javascript:`, `vbscript:` and non-image `data:` URLs. Browsers ignore
/// whitespace and control characters inside the scheme, so do we.
fn is_unsafe_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    compact.starts_with("javascript:")
        || compact.starts_with("vbscript:")
        || compact.starts_with("data:") && !compact.starts_with("data:image/")
}

fn is_style_script(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("expression(") || lower.contains("javascript:") || lower.contains("url(")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_removed_and_siblings_kept() {
        let out = sanitize_html("<p>Hi</p><script>x</script>").unwrap();
        assert_eq!(out, "<p>Hi</p>");
    }

    #[test]
    fn event_handlers_and_script_urls_are_stripped() {
        let out = sanitize_html(r#"<a href="javascript:alert(1)" onclick="x()">ok</a>"#).unwrap();
        assert!(out.contains(">ok</a>"), "got: {out}");
        assert!(!out.contains("javascript"), "got: {out}");
        assert!(!out.contains("onclick"), "got: {out}");
    }

    #[test]
    fn obfuscated_schemes_are_caught() {
        let out = sanitize_html("<a href=\" JaVa\tScRiPt:alert(1)\">x</a>").unwrap();
        assert!(!out.to_ascii_lowercase().contains("script"), "got: {out}");

        let out = sanitize_html(r#"<img src="data:text/html;base64,PHNjcmlwdD4=">"#).unwrap();
        assert!(!out.contains("data:"), "got: {out}");
    }

    #[test]
    fn entity_encoded_schemes_are_caught() {
        for href in [
            "&#106;avascript:alert(1)",
            "&#x6A;avascript:alert(1)",
            "javascript&colon;alert(1)",
            "java&#x09;script:alert(1)",
        ] {
            let out = sanitize_html(&format!(r#"<a href="{href}">x</a>"#)).unwrap();
            assert_eq!(out, "<a>x</a>", "href: {href}");
        }

        let out = sanitize_html(r#"<p style="background:&#117;rl(x)">b</p>"#).unwrap();
        assert_eq!(out, "<p>b</p>");
    }

    #[test]
    fn encoded_but_harmless_urls_are_kept() {
        let html = r#"<a href="/shop?a=1&amp;b=2">shop</a>"#;
        assert_eq!(sanitize_html(html).unwrap(), html);
    }

    #[test]
    fn benign_markup_passes_through_unchanged() {
        let html = r#"<h3>Specs</h3><ul><li><strong>Wood:</strong> maple</li></ul><a href="/shop">shop</a><img src="data:image/png;base64,AAAA" alt="dot">"#;
        assert_eq!(sanitize_html(html).unwrap(), html);
    }

    #[test]
    fn frames_styles_and_comments_are_dropped() {
        let out = sanitize_html(
            "<div><!-- hidden --><iframe src=\"https://evil\"></iframe><style>p{}</style>text</div>",
        )
        .unwrap();
        assert_eq!(out, "<div>text</div>");
    }

    #[test]
    fn dangerous_inline_styles_are_removed_but_plain_ones_kept() {
        let out = sanitize_html(
            r#"<p style="color: red">a</p><p style="background:url(javascript:x)">b</p>"#,
        )
        .unwrap();
        assert_eq!(out, r#"<p style="color: red">a</p><p>b</p>"#);
    }
}
