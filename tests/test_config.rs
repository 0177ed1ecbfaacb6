use crop_editor::config::{AppSettings, ThemePreference, DEFAULT_DOWNLOAD_NAME};
use crop_editor::modules::image_editor::CropMode;
use crop_editor::EditorError;

#[test]
fn test_defaults() {
    let s = AppSettings::default();
    assert_eq!(s.theme_preference, ThemePreference::System);
    assert_eq!(s.crop_mode, CropMode::Manual);
    assert_eq!(s.download_file_name, DEFAULT_DOWNLOAD_NAME);
    assert_eq!(s.upload_url, None);
    assert_eq!(s.aspect_ratio(), Some(1.0));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "crop_mode": "widget", "upload_url": "http://localhost:9000/up" }"#).unwrap();

    let s = AppSettings::load_from(&path).unwrap();
    assert_eq!(s.crop_mode, CropMode::Widget);
    assert_eq!(s.upload_url.as_deref(), Some("http://localhost:9000/up"));
    assert_eq!(s.download_file_name, DEFAULT_DOWNLOAD_NAME);
    assert_eq!(s.theme_preference, ThemePreference::System);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let s = AppSettings {
        theme_preference: ThemePreference::Dark,
        crop_mode: CropMode::Widget,
        download_file_name: "crop.jpg".to_string(),
        upload_url: Some("https://example.test/upload".to_string()),
        default_aspect_ratio: 1.5,
    };
    s.save_to(&path).unwrap();
    assert_eq!(AppSettings::load_from(&path).unwrap(), s);
}

#[test]
fn test_blank_values_are_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "download_file_name": "  ", "upload_url": "", "default_aspect_ratio": 0.0 }"#).unwrap();

    let s = AppSettings::load_from(&path).unwrap();
    assert_eq!(s.download_file_name, DEFAULT_DOWNLOAD_NAME);
    assert_eq!(s.upload_url, None);
    assert_eq!(s.aspect_ratio(), None);
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(AppSettings::load_from(&dir.path().join("missing.json")), Err(EditorError::Io(_))));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(AppSettings::load_from(&path), Err(EditorError::Settings(_))));
}

#[test]
fn test_theme_resolution() {
    use crop_editor::style::ThemeMode;
    use eframe::egui::Theme;
    assert_eq!(ThemePreference::System.resolve(Theme::Light), ThemeMode::Light);
    assert_eq!(ThemePreference::System.resolve(Theme::Dark), ThemeMode::Dark);
    assert_eq!(ThemePreference::Light.resolve(Theme::Dark), ThemeMode::Light);
}
