mod common;

use eframe::egui;

use crop_editor::modules::image_editor::{CropMode, CropRect, EditSession, FilterKind, InteractionState};
use crop_editor::EditorError;

use common::{decoded_ref, gradient, surface, undecoded_ref};

/// Session holding a decoded 100x80 gradient drawn at 1:1 from the origin.
fn ready_session(mode: CropMode) -> EditSession {
    let mut session = EditSession::new(mode, None);
    session.load(decoded_ref(gradient(100, 80)));
    session
}

fn full_display() -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 80.0))
}

#[test]
fn test_load_starts_fresh_history() {
    let session = ready_session(CropMode::Manual);
    assert!(session.is_ready());
    assert_eq!(session.store().len(), 1);
    assert!(!session.store().can_undo());
    assert_eq!(session.state(), InteractionState::Idle);
}

#[test]
fn test_manual_crop_then_undo() {
    let mut session = ready_session(CropMode::Manual);
    let s = session.surface(full_display()).unwrap();

    assert!(session.arm_crop(Some(&s)));
    session.pointer_down(&s, egui::pos2(10.0, 10.0));
    session.pointer_move(&s, egui::pos2(30.0, 30.0));
    session.pointer_up(&s, egui::pos2(50.0, 40.0));
    assert_eq!(session.crop().pending(), Some(CropRect::new(10.0, 10.0, 40.0, 30.0)));

    assert!(session.apply_crop().unwrap());
    assert_eq!(session.state(), InteractionState::Idle);
    assert_eq!(session.store().len(), 2);
    let current = session.current().unwrap();
    assert_eq!(current.dimensions(), Some((40, 30)));
    assert_eq!(current.pixels().unwrap().to_rgba8().get_pixel(0, 0).0, [10, 10, 0, 255]);

    assert!(session.undo());
    assert_eq!(session.current().unwrap().dimensions(), Some((100, 80)));
    assert!(!session.undo());
    assert_eq!(session.store().len(), 1);
}

#[test]
fn test_widget_crop_on_scaled_surface() {
    let mut session = EditSession::new(CropMode::Widget, Some(1.0));
    session.load(decoded_ref(gradient(200, 100)));
    // drawn at half size: the default box spans 400 source px before fitting
    let s = session.surface(egui::Rect::from_min_size(egui::pos2(5.0, 5.0), egui::vec2(100.0, 50.0))).unwrap();
    assert!(session.arm_crop(Some(&s)));
    assert!(session.apply_crop().unwrap());
    assert_eq!(session.current().unwrap().dimensions(), Some((100, 100)));
}

#[test]
fn test_apply_crop_without_candidate_is_noop() {
    let mut session = ready_session(CropMode::Manual);
    assert!(!session.apply_crop().unwrap());

    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    assert!(!session.apply_crop().unwrap());
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.state(), InteractionState::CropArmed);
}

#[test]
fn test_undo_ignored_mid_drag() {
    let mut session = ready_session(CropMode::Manual);
    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(0.0, 0.0));
    session.pointer_up(&s, egui::pos2(20.0, 20.0));
    session.apply_crop().unwrap();

    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(0.0, 0.0));
    assert_eq!(session.state(), InteractionState::Dragging);
    assert!(!session.undo());
    assert_eq!(session.store().len(), 2);
}

#[test]
fn test_undecoded_image_blocks_editing() {
    let mut session = EditSession::new(CropMode::Manual, None);
    session.load(undecoded_ref(gradient(10, 10)));
    assert!(!session.is_ready());
    assert!(session.surface(full_display()).is_none());
    assert!(!session.arm_crop(None));

    session.filters_mut().set(FilterKind::Contrast, 1.5);
    assert!(matches!(session.apply_filter(), Err(EditorError::DecodePending)));

    session.current().unwrap().decode().unwrap();
    assert!(session.is_ready());
    assert!(session.apply_filter().unwrap());
}

#[test]
fn test_load_discards_history_and_crop() {
    let mut session = ready_session(CropMode::Manual);
    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(0.0, 0.0));
    session.pointer_up(&s, egui::pos2(20.0, 20.0));
    session.apply_crop().unwrap();
    session.filters_mut().set(FilterKind::Saturation, 0.0);

    session.load(decoded_ref(gradient(5, 5)));
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.state(), InteractionState::Idle);
    assert!(session.filters().is_identity());
    assert_eq!(session.current().unwrap().dimensions(), Some((5, 5)));
}

#[test]
fn test_crop_survives_resized_display() {
    let mut session = ready_session(CropMode::Manual);
    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(0.0, 0.0));
    session.pointer_up(&s, egui::pos2(50.0, 40.0));

    // the window was resized: the kept candidate is in source pixels and
    // the next gesture maps through the new scale
    let bigger = session.surface(egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 160.0))).unwrap();
    assert_eq!(session.crop().pending(), Some(CropRect::new(0.0, 0.0, 50.0, 40.0)));
    session.pointer_down(&bigger, egui::pos2(0.0, 0.0));
    session.pointer_up(&bigger, egui::pos2(40.0, 40.0));
    assert_eq!(session.crop().pending(), Some(CropRect::new(0.0, 0.0, 20.0, 20.0)));

    assert!(session.apply_crop().unwrap());
    assert_eq!(session.current().unwrap().dimensions(), Some((20, 20)));
}

#[test]
fn test_zero_width_drag_leaves_history_unchanged() {
    let mut session = ready_session(CropMode::Manual);
    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(10.0, 10.0));
    session.pointer_up(&s, egui::pos2(10.0, 50.0));
    assert_eq!(session.crop().pending(), None);

    assert!(!session.apply_crop().unwrap());
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.current().unwrap().dimensions(), Some((100, 80)));
}

#[test]
fn test_sub_pixel_drag_leaves_history_unchanged() {
    let mut session = ready_session(CropMode::Manual);
    let s = session.surface(full_display()).unwrap();
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(10.0, 10.0));
    session.pointer_up(&s, egui::pos2(10.3, 50.0));

    assert!(!session.apply_crop().unwrap());
    assert_eq!(session.store().len(), 1);
}

#[test]
fn test_zoomed_out_drag_past_image_crops_whole_image() {
    let mut session = EditSession::new(CropMode::Manual, None);
    session.load(decoded_ref(gradient(200, 200)));
    // zoomed far out: 200x200 source pixels on a 2x2 point display
    let s = surface((0.0, 0.0), (2.0, 2.0), 200, 200);
    session.arm_crop(Some(&s));
    session.pointer_down(&s, egui::pos2(0.0, 0.0));
    session.pointer_up(&s, egui::pos2(1200.0, 800.0));
    assert_eq!(session.crop().pending(), Some(CropRect::new(0.0, 0.0, 200.0, 200.0)));

    assert!(session.apply_crop().unwrap());
    assert_eq!(session.current().unwrap().dimensions(), Some((200, 200)));
}

#[test]
fn test_widget_session_uses_surface() {
    let mut session = ready_session(CropMode::Widget);
    let s = surface((0.0, 0.0), (100.0, 80.0), 100, 80);
    session.arm_crop(Some(&s));
    session.crop_mut().set_box_size(30.0, 20.0, Some(&s));
    assert!(session.apply_crop().unwrap());
    assert_eq!(session.current().unwrap().dimensions(), Some((30, 20)));
}
