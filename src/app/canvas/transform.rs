use eframe::egui::{Pos2, Vec2, vec2};

use super::super::render_utils::ease_cubic_in_out;
use super::{CANVAS_SIZE, MARGIN, ZOOM_DURATION_SECS, ZOOM_SCALE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ViewTransform {
    pub(in crate::app) translate: Vec2,
    pub(in crate::app) scale: f32,
}

impl ViewTransform {
    pub(in crate::app) fn identity() -> Self {
        Self {
            translate: vec2(MARGIN, MARGIN),
            scale: 1.0,
        }
    }

    pub(in crate::app) fn focus(center: Pos2) -> Self {
        Self {
            translate: CANVAS_SIZE / 2.0 - center.to_vec2() * ZOOM_SCALE,
            scale: ZOOM_SCALE,
        }
    }

    pub(in crate::app) fn apply(&self, point: Pos2) -> Pos2 {
        (self.translate + point.to_vec2() * self.scale).to_pos2()
    }

    pub(in crate::app) fn invert(&self, point: Pos2) -> Pos2 {
        ((point.to_vec2() - self.translate) / self.scale).to_pos2()
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            translate: self.translate + (other.translate - self.translate) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ZoomAnimation {
    from: ViewTransform,
    to: ViewTransform,
    started: f64,
}

impl ZoomAnimation {
    pub(in crate::app) fn new(from: ViewTransform, to: ViewTransform, started: f64) -> Self {
        Self { from, to, started }
    }

    fn progress(&self, now: f64) -> f32 {
        ((now - self.started) / ZOOM_DURATION_SECS).clamp(0.0, 1.0) as f32
    }

    pub(in crate::app) fn at(&self, now: f64) -> ViewTransform {
        if self.finished(now) {
            return self.to;
        }
        self.from.lerp(&self.to, ease_cubic_in_out(self.progress(now)))
    }

    pub(in crate::app) fn finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}
