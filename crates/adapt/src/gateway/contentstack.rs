// crates/adapt/src/gateway/contentstack.rs

use super::{editable::annotate_editable, ContentGateway, GatewayError};
use async_trait::async_trait;
use domain::setting::Settings;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value as Json;
use std::time::Duration;
use tracing::debug;

const API_VERSION: &str = "v3";

/// Content delivery (or, while editing, preview) API of a Contentstack stack.
pub struct ContentstackGateway {
    client: Client,
    base: Url,
    api_key: String,
    token_header: &'static str,
    token: String,
    environment: String,
    locale: String,
    annotate: bool,
}

impl ContentstackGateway {
    pub fn new(settings: &Settings) -> Result<Self, GatewayError> {
        let base = Url::parse(&format!("https://{}/", settings.content_host()))
            .map_err(|e| GatewayError::Config(format!("invalid content host: {e}")))?;
        Self::with_base(settings, base)
    }

    /// Same as [`ContentstackGateway::new`] but against an explicit base URL.
    pub fn with_base(settings: &Settings, base: Url) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))?;

        let (token_header, token) = match settings.live_preview.preview_token.as_deref() {
            Some(preview) if settings.editing_enabled() => ("preview_token", preview.to_owned()),
            _ => ("access_token", settings.stack.delivery_token.clone()),
        };

        Ok(Self {
            client,
            base,
            api_key: settings.stack.api_key.clone(),
            token_header,
            token,
            environment: settings.stack.environment.clone(),
            locale: settings.stack.locale.clone(),
            annotate: settings.editing_enabled(),
        })
    }

    fn entries_url(&self, content_type: &str, key: Option<&str>) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GatewayError::Config(format!("cannot-be-a-base URL: {}", self.base)))?;
            segments
                .pop_if_empty()
                .extend([API_VERSION, "content_types", content_type, "entries"]);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        Ok(url)
    }

    fn params(&self, expand: bool) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("environment", self.environment.clone()),
            ("locale", self.locale.clone()),
        ];
        if expand {
            params.push(("include_all", "true".to_owned()));
            params.push(("include_all_depth", "1".to_owned()));
        }
        params
    }

    async fn get(&self, url: Url, params: &[(&str, String)]) -> Result<Option<Json>, GatewayError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .query(params)
            .header("api_key", &self.api_key)
            .header(self.token_header, &self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.json::<Json>().await?))
    }

    async fn first_entry(
        &self,
        content_type: &str,
        query: Option<Json>,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError> {
        let url = self.entries_url(content_type, None)?;
        let mut params = self.params(expand);
        if let Some(q) = query {
            params.push(("query", q.to_string()));
        }

        let Some(body) = self.get(url, &params).await? else {
            return Ok(None);
        };
        let entry = match body {
            Json::Object(mut map) => match map.remove("entries") {
                Some(Json::Array(entries)) => entries.into_iter().next(),
                _ => None,
            },
            _ => None,
        };
        Ok(entry.map(|e| self.finish(e, content_type)))
    }

    fn finish(&self, mut entry: Json, content_type: &str) -> Json {
        if self.annotate {
            annotate_editable(&mut entry, content_type, &self.locale);
        }
        entry
    }
}

#[async_trait]
impl ContentGateway for ContentstackGateway {
    #[tracing::instrument(skip_all, fields(content_type = %content_type, key = %key))]
    async fn fetch_by_key(
        &self,
        content_type: &str,
        key: &str,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError> {
        let url = self.entries_url(content_type, Some(key))?;
        let Some(body) = self.get(url, &self.params(expand)).await? else {
            return Ok(None);
        };
        let entry = match body {
            Json::Object(mut map) => map.remove("entry").filter(|e| !e.is_null()),
            _ => None,
        };
        Ok(entry.map(|e| self.finish(e, content_type)))
    }

    #[tracing::instrument(skip_all, fields(content_type = %content_type, slug = %slug))]
    async fn fetch_by_slug(
        &self,
        content_type: &str,
        slug: &str,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError> {
        let query = serde_json::json!({ "url": slug });
        self.first_entry(content_type, Some(query), expand).await
    }

    #[tracing::instrument(skip_all, fields(content_type = %content_type))]
    async fn fetch_singleton(
        &self,
        content_type: &str,
        expand: bool,
    ) -> Result<Option<Json>, GatewayError> {
        self.first_entry(content_type, None, expand).await
    }
}
