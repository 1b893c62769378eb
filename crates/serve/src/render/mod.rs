pub mod dispatch;
pub mod error;
pub mod node;
pub mod page;
pub mod sanitize;
pub mod sections;
pub mod template;

pub use dispatch::{render_blocks, RenderedBlock, EMPTY_BLOCK_PARENT_CLASS};
pub use error::RenderError;
pub use node::{Element, Node};
pub use page::{render_document, render_main};
pub use sanitize::sanitize_html;
pub use template::{HbsEngine, LiveBootstrap, PageShell, ShellModel, TemplateEngine};
