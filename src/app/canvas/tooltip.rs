use eframe::egui::{self, Context, Id, Order, Pos2, RichText, vec2};

use crate::hierarchy::NodeRef;
use crate::util::split_bullets;

use super::VizController;

const TOOLTIP_OFFSET: f32 = 10.0;
const TOOLTIP_MAX_WIDTH: f32 = 300.0;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct TooltipContent {
    pub(in crate::app) title: String,
    pub(in crate::app) purpose: Option<String>,
    pub(in crate::app) responsibilities: Vec<String>,
    pub(in crate::app) detail: Option<(&'static str, String)>,
    pub(in crate::app) people: Vec<String>,
}

impl TooltipContent {
    fn for_node(node: NodeRef<'_>) -> Option<Self> {
        match node {
            NodeRef::Root(_) => None,
            NodeRef::Circle(circle) => {
                let record = &circle.record;
                Some(Self {
                    title: record.name.clone(),
                    purpose: record.purpose.clone(),
                    responsibilities: bullets(record.responsibilities.as_deref()),
                    detail: record
                        .projects
                        .clone()
                        .map(|projects| ("Projects", projects)),
                    people: Vec::new(),
                })
            }
            NodeRef::Role(role) => {
                let record = &role.record;
                Some(Self {
                    title: record.name.clone(),
                    purpose: record.purpose.clone(),
                    responsibilities: bullets(record.responsibilities.as_deref()),
                    detail: record.area.clone().map(|area| ("Area", area)),
                    people: record
                        .people
                        .iter()
                        .map(|person| person.display_title().to_owned())
                        .collect(),
                })
            }
        }
    }
}

fn bullets(text: Option<&str>) -> Vec<String> {
    text.map(split_bullets).unwrap_or_default()
}

impl VizController {
    pub(in crate::app) fn hovered_tooltip(&self) -> Option<TooltipContent> {
        let scene = self.scene.as_ref()?;
        let node = scene.layout.nodes.get(self.hovered?)?;
        TooltipContent::for_node(scene.tree.node(node.key)?)
    }
}

pub(super) fn show_tooltip(ctx: &Context, pointer: Pos2, content: &TooltipContent) {
    egui::Area::new(Id::new("node_tooltip"))
        .order(Order::Tooltip)
        .interactable(false)
        .fixed_pos(pointer + vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(TOOLTIP_MAX_WIDTH);
                ui.label(RichText::new(&content.title).strong());

                if let Some(purpose) = &content.purpose {
                    ui.label(format!("Purpose: {purpose}"));
                }

                if !content.responsibilities.is_empty() {
                    ui.label(RichText::new("Responsibilities").strong());
                    for entry in &content.responsibilities {
                        ui.label(format!("• {entry}"));
                    }
                }

                if let Some((label, value)) = &content.detail {
                    ui.label(format!("{label}: {value}"));
                }

                if !content.people.is_empty() {
                    ui.label(RichText::new("Assigned people").strong());
                    for person in &content.people {
                        ui.label(format!("• {person}"));
                    }
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::testing::{FixedLayout, tree};
    use super::*;

    fn loaded() -> VizController {
        let mut controller = VizController::new(Box::new(FixedLayout));
        controller.load(tree());
        controller
    }

    #[test]
    fn role_tooltip_lists_bullets_and_people() {
        let mut controller = loaded();
        controller.hover(Some(2));

        assert_eq!(
            controller.hovered_tooltip(),
            Some(TooltipContent {
                title: "Lead".to_owned(),
                purpose: Some("Sets direction".to_owned()),
                responsibilities: vec!["Align priorities".to_owned(), "Assign roles".to_owned()],
                detail: None,
                people: vec!["Ana".to_owned(), "u-2".to_owned()],
            })
        );
    }

    #[test]
    fn circle_tooltip_has_no_people() {
        let mut controller = loaded();
        controller.hover(Some(1));

        let content = controller.hovered_tooltip().expect("circle tooltip");
        assert_eq!(content.title, "Core");
        assert_eq!(content.purpose.as_deref(), Some("Keep things running"));
        assert!(content.responsibilities.is_empty());
        assert_eq!(content.detail, Some(("Projects", "Atlas".to_owned())));
        assert!(content.people.is_empty());
    }

    #[test]
    fn root_and_empty_space_have_no_tooltip() {
        let mut controller = loaded();
        controller.hover(Some(0));
        assert_eq!(controller.hovered_tooltip(), None);
        controller.hover(None);
        assert_eq!(controller.hovered_tooltip(), None);
    }
}
