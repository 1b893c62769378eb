pub mod render;

use domain::page::PageState;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("handlebars error: {0}")]
    Handlebars(#[from] handlebars::RenderError),
}

impl From<handlebars::TemplateError> for Error {
    fn from(e: handlebars::TemplateError) -> Self {
        Error::Render(e.into())
    }
}

impl Error {
    pub fn to_status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// HTTP status for a whole-page outcome.
pub fn page_status(state: &PageState) -> StatusCode {
    match state {
        PageState::Loaded { .. } | PageState::Idle | PageState::Loading { .. } => StatusCode::OK,
        PageState::NotFound { .. } => StatusCode::NOT_FOUND,
        PageState::Error { .. } => StatusCode::BAD_GATEWAY,
    }
}
