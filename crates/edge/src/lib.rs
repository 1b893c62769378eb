pub mod cli;
pub mod router;
pub mod settings;

mod error;

pub use error::Error;
