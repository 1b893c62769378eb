// crates/edge/src/settings.rs

use crate::Error;
use config::{Config, Environment, File, FileFormat};
use domain::setting::Settings;
use std::path::Path;
use tracing::debug;

pub const SETTINGS_FILE: &str = "settings.toml";
pub const ENV_PREFIX: &str = "STOREFRONT";

/// Load `<dir>/settings.toml`, then apply `STOREFRONT__SECTION__KEY`
/// environment overrides, then validate.
#[tracing::instrument(skip_all)]
pub fn load_settings(dir: &Path) -> Result<Settings, Error> {
    let path = dir.join(SETTINGS_FILE);
    if !path.is_file() {
        return Err(Error::Config(format!(
            "{} not found at {}",
            SETTINGS_FILE,
            path.display()
        )));
    }

    debug!("reading settings from {}", path.display());
    let settings: Settings = Config::builder()
        .add_source(File::from(path.as_path()).format(FileFormat::Toml))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join(SETTINGS_FILE), body).unwrap();
    }

    #[test]
    fn reads_settings_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            r#"
            [server]
            ip = "0.0.0.0"
            port = 8080

            [stack]
            api_key = "blt_key"
            delivery_token = "cs_token"
            environment = "production"
            region = "eu"
            "#,
        );

        let s = load_settings(dir.path()).unwrap();
        assert_eq!(s.server.port, 8080);
        assert_eq!(s.stack.api_key, "blt_key");
        assert_eq!(s.content_host(), "eu-cdn.contentstack.com");
        assert!(!s.editing_enabled());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_settings(dir.path()), Err(Error::Config(_))));
    }

    #[test]
    fn blank_credentials_fail_validation() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            r#"
            [stack]
            api_key = ""
            delivery_token = "cs_token"
            environment = "production"
            "#,
        );
        assert!(matches!(
            load_settings(dir.path()),
            Err(Error::InvalidSettings(domain::Error::MissingSetting("stack.api_key")))
        ));
    }
}
