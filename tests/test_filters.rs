mod common;

use crop_editor::modules::image_editor::{CropMode, EditSession, FilterKind, FilterParams};

use common::{decoded_ref, solid};

#[test]
fn test_defaults_are_identity() {
    let params = FilterParams::default();
    assert!(params.is_identity());
    assert_eq!(params.brightness(), 100.0);
    for kind in [FilterKind::Contrast, FilterKind::Saturation, FilterKind::Vibrance, FilterKind::Exposure] {
        assert_eq!(params.get(kind), 1.0);
    }

    let img = solid(3, 3, [12, 200, 90, 255]);
    assert_eq!(params.apply(&img).to_rgba8(), img.to_rgba8());
}

#[test]
fn test_values_are_clamped() {
    let mut params = FilterParams::new();
    params.set(FilterKind::Contrast, 5.0);
    assert_eq!(params.contrast(), 2.0);
    params.set(FilterKind::Brightness, -10.0);
    assert_eq!(params.brightness(), 0.0);
    params.set(FilterKind::Exposure, f32::NAN);
    assert_eq!(params.exposure(), 1.0);
    params.set(FilterKind::Brightness, f32::NAN);
    assert_eq!(params.brightness(), 100.0);
}

#[test]
fn test_contrast_spreads_values() {
    let img = solid(2, 2, [200, 50, 128, 255]);
    let out = FilterParams::new().with(FilterKind::Contrast, 1.5).apply(&img).to_rgba8();
    let [r, g, _, a] = out.get_pixel(0, 0).0;
    assert!(r > 200);
    assert!(g < 50);
    assert_eq!(a, 255);
}

#[test]
fn test_zero_brightness_is_black_and_keeps_alpha() {
    let img = solid(2, 2, [180, 120, 60, 77]);
    let out = FilterParams::new().with(FilterKind::Brightness, 0.0).apply(&img).to_rgba8();
    // contrast 1 leaves 0 at 0
    assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 77]);
}

#[test]
fn test_zero_saturation_is_gray() {
    let img = solid(1, 1, [255, 0, 0, 255]);
    let out = FilterParams::new().with(FilterKind::Saturation, 0.0).apply(&img).to_rgba8();
    let [r, g, b, _] = out.get_pixel(0, 0).0;
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn test_exposure_brightens() {
    let img = solid(1, 1, [60, 60, 60, 255]);
    let out = FilterParams::new().with(FilterKind::Exposure, 1.5).apply(&img).to_rgba8();
    // half a unit is one stop
    assert_eq!(out.get_pixel(0, 0).0, [120, 120, 120, 255]);
}

#[test]
fn test_apply_pushes_and_undo_restores() {
    let mut session = EditSession::new(CropMode::Manual, None);
    let original = solid(4, 4, [200, 50, 128, 255]);
    session.load(decoded_ref(original.clone()));

    session.filters_mut().set(FilterKind::Contrast, 1.5);
    assert!(session.apply_filter().unwrap());
    assert_eq!(session.store().len(), 2);
    assert!(session.filters().is_identity());
    assert_ne!(session.current().unwrap().pixels().unwrap().to_rgba8(), original.to_rgba8());

    assert!(session.undo());
    assert_eq!(session.current().unwrap().pixels().unwrap().to_rgba8(), original.to_rgba8());
}

#[test]
fn test_identity_apply_leaves_history_alone() {
    let mut session = EditSession::new(CropMode::Manual, None);
    assert!(!session.apply_filter().unwrap());

    session.load(decoded_ref(solid(2, 2, [1, 2, 3, 255])));
    assert!(!session.apply_filter().unwrap());
    assert_eq!(session.store().len(), 1);
}
