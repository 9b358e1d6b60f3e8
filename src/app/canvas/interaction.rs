use eframe::egui::{Pos2, Response, Ui};

use super::{VizAction, VizController};

impl VizController {
    /// Deepest node under `canvas_point`, if any. Later nodes win ties since
    /// they are drawn on top.
    pub(in crate::app) fn hit_test(&self, canvas_point: Pos2, now: f64) -> Option<usize> {
        let scene = self.scene.as_ref()?;
        let point = self.transform_at(now).invert(canvas_point);

        scene
            .layout
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.radius > 0.0 && node.center.distance(point) <= node.radius)
            .max_by_key(|(_, node)| node.depth)
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn handle_pointer(
        &mut self,
        ui: &Ui,
        response: &Response,
        origin: Pos2,
        now: f64,
    ) -> Option<VizAction> {
        let hovered = if response.hovered() {
            ui.input(|input| input.pointer.hover_pos())
                .and_then(|pointer| self.hit_test((pointer - origin).to_pos2(), now))
        } else {
            None
        };
        self.hover(hovered);

        if !response.clicked() {
            return None;
        }

        let hit = response
            .interact_pointer_pos()
            .and_then(|pointer| self.hit_test((pointer - origin).to_pos2(), now));
        self.click(hit, now)
    }
}
