// crates/serve/src/render/template.rs

use super::error::RenderError;
use domain::content::Seo;
use handlebars::Handlebars;
use serde::Serialize;
use std::io::Write;

/// Trait for template engines that can render to an arbitrary `Write`.
pub trait TemplateEngine: Send + Sync {
    fn render_to_write<M, W>(
        &self,
        template_name: &str,
        model: &M,
        out: &mut W,
    ) -> Result<(), RenderError>
    where
        M: Serialize,
        W: Write;
}

/// Handlebars-based template engine implementation.
pub struct HbsEngine {
    handlebars: Handlebars<'static>,
}

impl HbsEngine {
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }

    /// Register a template by name.
    pub fn register_template_str(&mut self, name: &str, template: &str) -> Result<(), RenderError> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(RenderError::from)
    }
}

impl Default for HbsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HbsEngine {
    fn render_to_write<M, W>(
        &self,
        template_name: &str,
        model: &M,
        out: &mut W,
    ) -> Result<(), RenderError>
    where
        M: Serialize,
        W: Write,
    {
        self.handlebars
            .render_to_write(template_name, model, out)
            .map_err(RenderError::from)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page shell
// ─────────────────────────────────────────────────────────────────────────────

const SHELL_TEMPLATE: &str = "page";

const SHELL_SOURCE: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
{{#if description}}<meta name="description" content="{{description}}">
{{/if}}{{#if keywords}}<meta name="keywords" content="{{keywords}}">
{{/if}}{{#if noindex}}<meta name="robots" content="noindex">
{{/if}}{{#if live}}<script id="live-preview-config" type="application/json">{{{live}}}</script>
<script>
(function () {
  var cfg = JSON.parse(document.getElementById("live-preview-config").textContent);
  if (!window.EventSource) return;
  var events = new EventSource(cfg.events_url);
  events.addEventListener("main", function (e) {
    var main = document.querySelector("main");
    if (main) main.outerHTML = e.data;
  });
})();
</script>
{{/if}}</head>
<body>
{{{body}}}
</body>
</html>
"#;

/// Values the live editor needs in the browser.
#[derive(Debug, Clone, Serialize)]
pub struct LiveBootstrap {
    pub api_key: String,
    pub environment: String,
    pub app_host: String,
    pub events_url: String,
}

/// Everything the page shell template reads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShellModel {
    pub lang: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub noindex: bool,
    /// Rendered, already-safe body markup.
    pub body: String,
    /// Script-safe JSON for the live bootstrap, when editing is on.
    pub live: Option<String>,
}

impl ShellModel {
    pub fn new(title: impl Into<String>, body: String) -> Self {
        Self {
            lang: "en".to_owned(),
            title: title.into(),
            body,
            ..Self::default()
        }
    }

    /// SEO fields pass through as authored; `meta_title` wins over the page title.
    pub fn with_seo(mut self, seo: Option<&Seo>) -> Self {
        let Some(seo) = seo else {
            return self;
        };
        if let Some(t) = seo.meta_title.as_deref().filter(|t| !t.trim().is_empty()) {
            self.title = t.to_owned();
        }
        self.description = seo.meta_description.clone().filter(|d| !d.trim().is_empty());
        self.keywords = seo.keywords.clone().filter(|k| !k.trim().is_empty());
        self.noindex = seo.enable_search_indexing == Some(false);
        self
    }

    pub fn with_live(mut self, live: Option<&LiveBootstrap>) -> Result<Self, RenderError> {
        self.live = match live {
            Some(cfg) => Some(script_safe_json(cfg)?),
            None => None,
        };
        Ok(self)
    }
}

/// JSON that cannot close the `<script>` element it is embedded in.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// The HTML document around every rendered page. Built once, shared.
pub struct PageShell {
    engine: HbsEngine,
}

impl PageShell {
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = HbsEngine::new();
        engine.register_template_str(SHELL_TEMPLATE, SHELL_SOURCE)?;
        Ok(Self { engine })
    }

    pub fn render(&self, model: &ShellModel) -> Result<String, RenderError> {
        let mut out = Vec::with_capacity(model.body.len() + SHELL_SOURCE.len());
        self.engine
            .render_to_write(SHELL_TEMPLATE, model, &mut out)?;
        String::from_utf8(out).map_err(|e| RenderError::Template(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_escapes_title_and_inlines_body() {
        let shell = PageShell::new().unwrap();
        let html = shell
            .render(&ShellModel::new("Drums & <Bass>", "<main>hi</main>".into()))
            .unwrap();
        assert!(html.contains("<title>Drums &amp; &lt;Bass&gt;</title>"));
        assert!(html.contains("<main>hi</main>"));
        assert!(!html.contains("robots"));
        assert!(!html.contains("EventSource"));
    }

    #[test]
    fn seo_fields_pass_through() {
        let seo = Seo {
            meta_title: Some("Shop drums".into()),
            meta_description: Some("Best kits".into()),
            keywords: None,
            enable_search_indexing: Some(false),
        };
        let model = ShellModel::new("Home", String::new()).with_seo(Some(&seo));
        let html = PageShell::new().unwrap().render(&model).unwrap();
        assert!(html.contains("<title>Shop drums</title>"));
        assert!(html.contains(r#"<meta name="description" content="Best kits">"#));
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert!(!html.contains("keywords"));
    }

    #[test]
    fn live_bootstrap_is_script_safe() {
        let live = LiveBootstrap {
            api_key: "blt</script><script>x".into(),
            environment: "dev".into(),
            app_host: "app.contentstack.com".into(),
            events_url: "/live/events/".into(),
        };
        let model = ShellModel::new("Home", String::new())
            .with_live(Some(&live))
            .unwrap();
        let html = PageShell::new().unwrap().render(&model).unwrap();
        assert!(html.contains("EventSource"));
        assert!(html.contains(r"blt\u003c/script\u003e"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
