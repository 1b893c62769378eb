pub mod block;
pub mod content;
pub mod edit;
pub mod page;
pub mod reference;
pub mod setting;

mod de;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required setting `{0}`")]
    MissingSetting(&'static str),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}
