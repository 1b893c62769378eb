use super::{container, shell, text_el};
use crate::render::{error::RenderError, node::Element};
use domain::{block::OurTeamBlock, content::Team};

pub fn render(block: &OurTeamBlock) -> Result<Element, RenderError> {
    let members = block
        .our_team
        .iter()
        .filter_map(|r| r.as_full())
        .map(member);

    Ok(shell(
        "bg-white",
        block.edit.entity(),
        container()
            .child_opt(text_el(
                "h2",
                block.title_h2.as_ref(),
                "text-3xl md:text-4xl font-bold text-gray-900 text-center mb-12",
                block.edit.field("title_h2"),
            ))
            .child(
                Element::new("div")
                    .class("grid grid-cols-1 md:grid-cols-3 gap-8")
                    .children(members),
            ),
    ))
}

fn member(team: &Team) -> Element {
    Element::new("div")
        .class("bg-gray-50 p-6 rounded-lg text-center")
        .edit(team.edit.entity())
        .child(
            Element::new("h3")
                .class("text-xl font-semibold mb-2")
                .edit(team.edit.field("title"))
                .text(&team.title),
        )
        .child_opt(text_el(
            "p",
            team.description.as_ref(),
            "text-gray-600",
            team.edit.field("description"),
        ))
}
