use eframe::egui::{Color32, Pos2, Rect, Stroke};

pub(super) const ROOT_FILL: Color32 = Color32::from_rgb(0x4f, 0x46, 0xe5);
pub(super) const CIRCLE_FILL: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
pub(super) const ROLE_FILL: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
pub(super) const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24);
pub(super) const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

pub(super) const BORDER: Stroke = Stroke {
    width: 2.0,
    color: Color32::WHITE,
};
pub(super) const HOVER_BORDER: Stroke = Stroke {
    width: 3.0,
    color: Color32::BLACK,
};
pub(super) const FOCUS_BORDER: Stroke = Stroke {
    width: 4.0,
    color: Color32::BLACK,
};

pub(super) fn depth_fill(depth: u8) -> Color32 {
    match depth {
        0 => ROOT_FILL,
        1 => CIRCLE_FILL,
        _ => ROLE_FILL,
    }
}

pub(super) fn label_font_size(depth: u8) -> f32 {
    match depth {
        0 => 16.0,
        1 => 14.0,
        _ => 6.0,
    }
}

pub(super) fn label_color(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 160.0 {
        Color32::from_rgb(0x1f, 0x29, 0x37)
    } else {
        Color32::WHITE
    }
}

pub(super) fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}
