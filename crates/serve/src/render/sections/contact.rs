use super::{container, present, shell, H2_CLASS};
use crate::render::{error::RenderError, node::Element};
use domain::{block::ContactUsBlock, content::Contact};

/// Shows the first populated contact the block points at.
pub fn render(block: &ContactUsBlock) -> Result<Element, RenderError> {
    let contact = block.reference.iter().find_map(|r| r.as_full());

    Ok(shell(
        "bg-white",
        block.edit.entity(),
        container()
            .child(
                Element::new("h2")
                    .class(H2_CLASS)
                    .class("text-center mb-12")
                    .text("Contact Us"),
            )
            .child_opt(contact.map(card)),
    ))
}

fn card(contact: &Contact) -> Element {
    let numbers = contact.phone_numbers();
    let phones = (!numbers.is_empty()).then(|| numbers.join(", "));

    Element::new("div")
        .class("max-w-2xl mx-auto bg-gray-50 p-8 rounded-lg")
        .edit(contact.edit.entity())
        .child(
            Element::new("h3")
                .class("text-2xl font-semibold mb-4")
                .edit(contact.edit.field("title"))
                .text(&contact.title),
        )
        .child_opt(labelled(
            "Address:",
            present(contact.address.as_ref()),
            contact,
            "address",
        ))
        .child_opt(labelled(
            "Email:",
            present(contact.email_address.as_ref()),
            contact,
            "email_address",
        ))
        .child_opt(labelled(
            "Phone:",
            phones.as_deref(),
            contact,
            "contact_number",
        ))
}

fn labelled(label: &str, value: Option<&str>, contact: &Contact, field: &str) -> Option<Element> {
    value.map(|v| {
        Element::new("p")
            .class("mb-4")
            .edit(contact.edit.field(field))
            .child(Element::new("strong").text(label))
            .text(format!(" {v}"))
    })
}
