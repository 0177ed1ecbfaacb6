use eframe::egui;

use super::ie_crop::{CropHandle, InteractionState};

pub(super) const HANDLE_HIT: f32 = 18.0;
pub(super) const HANDLE_VIS: f32 = 8.0;

pub(super) fn crop_handle_positions(r: egui::Rect) -> [(CropHandle, egui::Pos2); 9] {
    let (cx, cy) = (r.center().x, r.center().y);
    [
        (CropHandle::NW, r.left_top()),
        (CropHandle::N,  egui::pos2(cx, r.min.y)),
        (CropHandle::NE, r.right_top()),
        (CropHandle::E,  egui::pos2(r.max.x, cy)),
        (CropHandle::SE, r.right_bottom()),
        (CropHandle::S,  egui::pos2(cx, r.max.y)),
        (CropHandle::SW, r.left_bottom()),
        (CropHandle::W,  egui::pos2(r.min.x, cy)),
        (CropHandle::Move, r.center()),
    ]
}

/// Handle under `pos` for a crop box drawn at `r` (screen space). Handles
/// win over the body; boxes too small to grab fall back to moving.
pub(super) fn crop_hit_handle(pos: egui::Pos2, r: egui::Rect) -> Option<CropHandle> {
    if r.width() > HANDLE_HIT && r.height() > HANDLE_HIT {
        for (h, hp) in crop_handle_positions(r) {
            if h == CropHandle::Move { continue; }
            if egui::Rect::from_center_size(hp, egui::vec2(HANDLE_HIT, HANDLE_HIT)).contains(pos) {
                return Some(h);
            }
        }
    }
    if r.contains(pos) { return Some(CropHandle::Move); }
    None
}

pub(super) fn cursor_for_handle(h: CropHandle) -> egui::CursorIcon {
    match h {
        CropHandle::Move => egui::CursorIcon::Move,
        CropHandle::N | CropHandle::S => egui::CursorIcon::ResizeVertical,
        CropHandle::E | CropHandle::W => egui::CursorIcon::ResizeHorizontal,
        CropHandle::NE | CropHandle::SW => egui::CursorIcon::ResizeNeSw,
        CropHandle::NW | CropHandle::SE => egui::CursorIcon::ResizeNwSe,
    }
}

pub(super) fn cursor_for_state(state: InteractionState) -> egui::CursorIcon {
    match state {
        InteractionState::Idle => egui::CursorIcon::PointingHand,
        InteractionState::CropArmed | InteractionState::Dragging => egui::CursorIcon::Crosshair,
    }
}

pub(super) fn draw_crop_handles(painter: &egui::Painter, r: egui::Rect, color: egui::Color32) {
    for (h, hp) in crop_handle_positions(r) {
        if h == CropHandle::Move { continue; }
        let knob: egui::Rect = egui::Rect::from_center_size(hp, egui::vec2(HANDLE_VIS, HANDLE_VIS));
        painter.rect_filled(knob, 2.0, color);
        painter.rect_stroke(knob, 2.0, egui::Stroke::new(1.0, egui::Color32::WHITE), egui::StrokeKind::Outside);
    }
}

/// Darkens everything in `outer` except `hole`.
pub(super) fn dim_outside(painter: &egui::Painter, outer: egui::Rect, hole: egui::Rect, color: egui::Color32) {
    let hole: egui::Rect = hole.intersect(outer);
    if hole.min.y > outer.min.y { painter.rect_filled(egui::Rect::from_min_max(outer.min, egui::pos2(outer.max.x, hole.min.y)), 0.0, color); }
    if hole.max.y < outer.max.y { painter.rect_filled(egui::Rect::from_min_max(egui::pos2(outer.min.x, hole.max.y), outer.max), 0.0, color); }
    if hole.min.x > outer.min.x { painter.rect_filled(egui::Rect::from_min_max(egui::pos2(outer.min.x, hole.min.y), egui::pos2(hole.min.x, hole.max.y)), 0.0, color); }
    if hole.max.x < outer.max.x { painter.rect_filled(egui::Rect::from_min_max(egui::pos2(hole.max.x, hole.min.y), egui::pos2(outer.max.x, hole.max.y)), 0.0, color); }
}

/// Zoom that fits an image of `size` inside `canvas` without upscaling.
pub(super) fn fit_zoom(canvas: egui::Rect, size: (u32, u32)) -> f32 {
    let sx: f32 = canvas.width() / size.0.max(1) as f32;
    let sy: f32 = canvas.height() / size.1.max(1) as f32;
    sx.min(sy).min(1.0).max(0.01)
}

pub(super) fn to_color_image(img: &image::DynamicImage) -> egui::ColorImage {
    let rgba: image::RgbaImage = img.to_rgba8();
    let size: [usize; 2] = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

/// Point where a drag began. egui only reports a drag once the pointer has
/// moved past its threshold, so the press origin is preferred over the
/// current position.
pub(super) fn drag_start_point(press_origin: Option<egui::Pos2>, current: Option<egui::Pos2>) -> Option<egui::Pos2> {
    press_origin.or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_start_prefers_press_origin() {
        let origin: egui::Pos2 = egui::pos2(10.0, 10.0);
        let moved: egui::Pos2 = egui::pos2(16.0, 13.0);
        assert_eq!(drag_start_point(Some(origin), Some(moved)), Some(origin));
        assert_eq!(drag_start_point(None, Some(moved)), Some(moved));
        assert_eq!(drag_start_point(None, None), None);
    }
}
