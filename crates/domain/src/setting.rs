use crate::Error;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    #[serde(alias = "na")]
    Us,
    Eu,
    AzureNa,
    AzureEu,
    GcpNa,
}

impl Region {
    fn prefix(self) -> &'static str {
        match self {
            Region::Us => "",
            Region::Eu => "eu-",
            Region::AzureNa => "azure-na-",
            Region::AzureEu => "azure-eu-",
            Region::GcpNa => "gcp-na-",
        }
    }

    /// Content delivery host for published content.
    pub fn delivery_host(self) -> String {
        match self {
            Region::Us => "cdn.contentstack.io".to_owned(),
            other => format!("{}cdn.contentstack.com", other.prefix()),
        }
    }

    /// Host serving draft content while live preview is on.
    pub fn preview_host(self) -> String {
        format!("{}rest-preview.contentstack.com", self.prefix())
    }

    /// Origin of the visual editor application.
    pub fn app_host(self) -> String {
        format!("{}app.contentstack.com", self.prefix())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// IP address the HTTP listener binds to
    pub ip: IpAddr,

    /// HTTP port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StackSettings {
    pub api_key: String,
    pub delivery_token: String,
    pub environment: String,

    #[serde(default)]
    pub region: Region,

    /// Overrides the region's delivery host.
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en-us".to_owned()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LivePreviewSettings {
    #[serde(default)]
    pub enable: bool,

    #[serde(default)]
    pub preview_token: Option<String>,

    /// Overrides the region's preview host.
    #[serde(default)]
    pub host: Option<String>,

    /// Overrides the region's visual editor origin.
    #[serde(default)]
    pub app_host: Option<String>,
}

/// Process-wide settings. Built once at startup, then shared read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub stack: StackSettings,
    #[serde(default)]
    pub live_preview: LivePreviewSettings,
}

impl Settings {
    pub fn editing_enabled(&self) -> bool {
        self.live_preview.enable
    }

    /// Host content is read from: the preview host while editing, else delivery.
    pub fn content_host(&self) -> String {
        if self.editing_enabled() {
            self.live_preview
                .host
                .clone()
                .unwrap_or_else(|| self.stack.region.preview_host())
        } else {
            self.stack
                .host
                .clone()
                .unwrap_or_else(|| self.stack.region.delivery_host())
        }
    }

    pub fn app_host(&self) -> String {
        self.live_preview
            .app_host
            .clone()
            .unwrap_or_else(|| self.stack.region.app_host())
    }

    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("stack.api_key", &self.stack.api_key),
            ("stack.delivery_token", &self.stack.delivery_token),
            ("stack.environment", &self.stack.environment),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::MissingSetting(name));
            }
        }

        if self.server.port == 0 {
            return Err(Error::InvalidSetting {
                name: "server.port",
                reason: "port must be non-zero".to_owned(),
            });
        }

        if self.editing_enabled()
            && self
                .live_preview
                .preview_token
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
        {
            return Err(Error::MissingSetting("live_preview.preview_token"));
        }

        Ok(())
    }
}
