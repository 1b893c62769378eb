use super::{container, present, shell};
use crate::render::{error::RenderError, node::Element};
use domain::block::ProductSpecsBlock;

/// Nothing at all when the block has no `specs` group.
pub fn render(block: &ProductSpecsBlock) -> Result<Option<Element>, RenderError> {
    let Some(specs) = block.specs.as_ref() else {
        return Ok(None);
    };

    let body = match present(specs.set_type.as_ref()) {
        Some(set_type) => Element::new("div")
            .class("flex justify-between items-center py-6 px-4 rounded-lg border")
            .child(
                Element::new("span")
                    .class("text-lg font-bold text-gray-800 uppercase tracking-wide")
                    .text("Set Type:"),
            )
            .child(
                Element::new("span")
                    .class("text-xl font-black text-purple-700 px-6 py-2 rounded-full")
                    .edit(block.edit.field("specs"))
                    .text(set_type),
            ),
        None => Element::new("p")
            .class("text-gray-600 text-center italic")
            .text("No specifications available for this product."),
    };

    Ok(Some(shell(
        "bg-white",
        block.edit.entity(),
        container()
            .child(
                Element::new("h2")
                    .class("text-3xl md:text-4xl font-black text-gray-900 text-center mb-10 uppercase")
                    .text("Product Specifications"),
            )
            .child(
                Element::new("div")
                    .class("max-w-3xl mx-auto bg-white rounded-xl shadow-xl p-8")
                    .child(body),
            ),
    )))
}
