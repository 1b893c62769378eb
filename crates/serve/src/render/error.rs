use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("handlebars error: {0}")]
    Handlebars(#[from] handlebars::RenderError),

    #[error("lol_html error: {0}")]
    LolHtml(String),

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("`{block}` block is missing required field `{field}`")]
    MissingField {
        block: &'static str,
        field: &'static str,
    },

    #[error("`{tag}` block could not be decoded: {reason}")]
    Malformed { tag: &'static str, reason: String },
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(e: handlebars::TemplateError) -> Self {
        RenderError::Template(e.to_string())
    }
}
