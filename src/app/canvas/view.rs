use eframe::egui::{Align2, Color32, FontId, Sense, Ui};

use super::super::render_utils::{CANVAS_BACKGROUND, circle_visible, label_color, label_font_size};
use super::tooltip::show_tooltip;
use super::{CANVAS_SIZE, LABEL_MIN_RADIUS, VizAction, VizController};

impl VizController {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) -> Option<VizAction> {
        let now = ui.input(|input| input.time);
        let (rect, response) = ui.allocate_exact_size(CANVAS_SIZE, Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, CANVAS_BACKGROUND);

        let action = self.handle_pointer(ui, &response, rect.min, now);
        self.settle(now);
        let transform = self.transform_at(now);

        let Some(scene) = &self.scene else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Connect your Notion databases to draw the organization.",
                FontId::proportional(14.0),
                Color32::GRAY,
            );
            return action;
        };

        for (index, node) in scene.layout.nodes.iter().enumerate() {
            let center = rect.min + transform.apply(node.center).to_vec2();
            let radius = node.radius * transform.scale;
            if !circle_visible(rect, center, radius) {
                continue;
            }
            let Some(style) = self.node_style(index) else {
                continue;
            };

            painter.circle(center, radius, style.fill, style.stroke);

            if node.radius < LABEL_MIN_RADIUS {
                continue;
            }
            if let Some(name) = scene.tree.node(node.key).map(|node| node.name().to_owned()) {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    name,
                    FontId::proportional(label_font_size(node.depth) * transform.scale),
                    label_color(style.fill),
                );
            }
        }

        if let Some(content) = self.hovered_tooltip()
            && let Some(pointer) = response.hover_pos()
        {
            show_tooltip(ui.ctx(), pointer, &content);
        }

        if self.is_animating(now) {
            ui.ctx().request_repaint();
        }

        action
    }
}
