use eframe::egui::{Color32, Stroke, Vec2, vec2};
use tracing::debug;

use crate::hierarchy::{NodeRef, OrgTree};
use crate::layout::{LayoutProvider, PackBounds, PackedTree};
use crate::util::notion_page_url;

use self::highlight::highlight_mask;
use self::transform::{ViewTransform, ZoomAnimation};
use super::render_utils::{BORDER, FOCUS_BORDER, HIGHLIGHT_FILL, HOVER_BORDER, depth_fill};

mod highlight;
mod interaction;
#[cfg(test)]
mod testing;
mod tooltip;
mod transform;
mod view;

pub(in crate::app) const CANVAS_SIZE: Vec2 = vec2(800.0, 600.0);
pub(in crate::app) const MARGIN: f32 = 20.0;
const PACK_PADDING: f32 = 3.0;
const ZOOM_SCALE: f32 = 1.5;
const ZOOM_DURATION_SECS: f64 = 0.75;
const LABEL_MIN_RADIUS: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum VizPhase {
    Idle,
    Rendered,
    Zoomed { node: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) enum VizAction {
    OpenUrl(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct NodeStyle {
    pub(in crate::app) fill: Color32,
    pub(in crate::app) stroke: Stroke,
}

struct Scene {
    tree: OrgTree,
    layout: PackedTree,
    highlighted: Vec<bool>,
}

pub(in crate::app) struct VizController {
    provider: Box<dyn LayoutProvider>,
    scene: Option<Scene>,
    phase: VizPhase,
    transform: ViewTransform,
    animation: Option<ZoomAnimation>,
    hovered: Option<usize>,
    filter: String,
}

impl VizController {
    pub(in crate::app) fn new(provider: Box<dyn LayoutProvider>) -> Self {
        Self {
            provider,
            scene: None,
            phase: VizPhase::Idle,
            transform: ViewTransform::identity(),
            animation: None,
            hovered: None,
            filter: String::new(),
        }
    }

    fn pack_bounds() -> PackBounds {
        PackBounds {
            width: CANVAS_SIZE.x - MARGIN * 2.0,
            height: CANVAS_SIZE.y - MARGIN * 2.0,
            padding: PACK_PADDING,
        }
    }

    pub(in crate::app) fn load(&mut self, tree: OrgTree) {
        let layout = self.provider.pack(&tree, Self::pack_bounds());
        debug!(nodes = layout.nodes.len(), "laid out organization");

        self.scene = Some(Scene {
            highlighted: vec![false; layout.nodes.len()],
            tree,
            layout,
        });
        self.phase = VizPhase::Rendered;
        self.transform = ViewTransform::identity();
        self.animation = None;
        self.hovered = None;
        self.filter.clear();
    }

    #[cfg(test)]
    pub(in crate::app) fn phase(&self) -> VizPhase {
        self.phase
    }

    pub(in crate::app) fn tree(&self) -> Option<&OrgTree> {
        self.scene.as_ref().map(|scene| &scene.tree)
    }

    pub(in crate::app) fn filter(&self) -> &str {
        &self.filter
    }

    pub(in crate::app) fn set_filter(&mut self, query: &str) {
        self.filter = query.to_owned();
        if let Some(scene) = &mut self.scene {
            scene.highlighted = highlight_mask(&scene.tree, &scene.layout, &self.filter);
        }
    }

    pub(in crate::app) fn hover(&mut self, node: Option<usize>) {
        self.hovered = node;
    }

    pub(in crate::app) fn click(&mut self, hit: Option<usize>, now: f64) -> Option<VizAction> {
        let scene = self.scene.as_ref()?;

        let Some(index) = hit else {
            self.zoom_to(ViewTransform::identity(), now);
            self.phase = VizPhase::Rendered;
            return None;
        };

        let node = scene.layout.nodes.get(index)?;
        let center = match scene.tree.node(node.key)? {
            NodeRef::Root(_) => return None,
            NodeRef::Circle(circle) => {
                debug!(circle = %circle.record.name, "zooming to circle");
                node.center
            }
            NodeRef::Role(role) => {
                return role
                    .record
                    .page_id
                    .as_deref()
                    .and_then(notion_page_url)
                    .map(VizAction::OpenUrl);
            }
        };

        self.zoom_to(ViewTransform::focus(center), now);
        self.phase = VizPhase::Zoomed { node: index };
        None
    }

    fn zoom_to(&mut self, target: ViewTransform, now: f64) {
        let from = self.transform_at(now);
        self.animation = Some(ZoomAnimation::new(from, target, now));
        self.transform = target;
    }

    pub(in crate::app) fn transform_at(&self, now: f64) -> ViewTransform {
        match &self.animation {
            Some(animation) => animation.at(now),
            None => self.transform,
        }
    }

    pub(in crate::app) fn is_animating(&self, now: f64) -> bool {
        self.animation
            .is_some_and(|animation| !animation.finished(now))
    }

    fn settle(&mut self, now: f64) {
        if self.animation.is_some_and(|animation| animation.finished(now)) {
            self.animation = None;
        }
    }

    pub(in crate::app) fn node_style(&self, index: usize) -> Option<NodeStyle> {
        let scene = self.scene.as_ref()?;
        let node = scene.layout.nodes.get(index)?;

        let fill = if node.depth == 2 && scene.highlighted.get(index).copied().unwrap_or(false) {
            HIGHLIGHT_FILL
        } else {
            depth_fill(node.depth)
        };
        let stroke = if self.phase == (VizPhase::Zoomed { node: index }) {
            FOCUS_BORDER
        } else if self.hovered == Some(index) {
            HOVER_BORDER
        } else {
            BORDER
        };

        Some(NodeStyle { fill, stroke })
    }
}
