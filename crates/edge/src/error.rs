use adapt::GatewayError;
use serve::Error as ServeError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] domain::Error),

    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("serve error: {0}")]
    ServeError(#[from] ServeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serve::render::RenderError> for Error {
    fn from(e: serve::render::RenderError) -> Self {
        Error::ServeError(e.into())
    }
}
