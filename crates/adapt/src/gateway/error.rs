use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content API answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("could not decode `{content_type}` entry: {reason}")]
    Decode {
        content_type: String,
        reason: String,
    },

    #[error("gateway configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub(crate) fn decode(content_type: &str, err: impl std::fmt::Display) -> Self {
        GatewayError::Decode {
            content_type: content_type.to_owned(),
            reason: err.to_string(),
        }
    }
}
