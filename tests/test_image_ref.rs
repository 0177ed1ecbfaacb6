mod common;

use image::ImageFormat;

use crop_editor::modules::helpers::image_export::{encode_to_bytes, ExportFormat};
use crop_editor::modules::image_editor::{ImageRef, ImageSource};
use crop_editor::EditorError;

use common::{decoded_ref, gradient};

#[test]
fn test_data_url_round_trip() {
    let img = decoded_ref(gradient(6, 4));
    let url = img.to_data_url();
    assert!(url.starts_with("data:image/png;base64,"));

    let back = ImageRef::from_data_url(&url).unwrap();
    assert!(back.same_payload(&img));
    assert_eq!(back.format(), ImageFormat::Png);
    assert!(!back.is_decoded());
    assert_eq!(back.decode().unwrap().width(), 6);
    assert_eq!(back.dimensions(), Some((6, 4)));
}

#[test]
fn test_data_url_errors() {
    assert!(matches!(ImageRef::from_data_url("data:image/png,rawbytes"), Err(EditorError::InvalidDataUrl(_))));
    assert!(matches!(ImageRef::from_data_url("data:image/png;base64,@@@"), Err(EditorError::Base64(_))));
    assert!(matches!(ImageRef::from_bytes(b"definitely not an image".to_vec()), Err(EditorError::Image(_))));
}

#[test]
fn test_format_is_sniffed_from_content() {
    let jpeg = encode_to_bytes(&gradient(8, 8), ExportFormat::Jpeg, 80).unwrap();
    let img = ImageRef::from_bytes(jpeg).unwrap();
    assert_eq!(img.format(), ImageFormat::Jpeg);
    assert_eq!(img.mime_type(), "image/jpeg");
}

#[test]
fn test_clones_share_decoded_pixels() {
    let png = decoded_ref(gradient(3, 3)).encoded().to_vec();
    let a = ImageRef::from_bytes(png).unwrap();
    let b = a.clone();
    a.decode().unwrap();
    assert!(b.is_decoded());
    assert_eq!(a, b);
}

#[test]
fn test_source_from_arg() {
    assert!(matches!(ImageSource::from_arg("data:image/png;base64,AAAA"), ImageSource::DataUrl(_)));
    assert!(matches!(ImageSource::from_arg("photos/cat.png"), ImageSource::Path(_)));
    assert_eq!(ImageSource::from_arg("photos/cat.png").display_name(), "cat.png");
}

#[test]
fn test_source_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.png");
    std::fs::write(&path, decoded_ref(gradient(2, 2)).encoded()).unwrap();
    let img = ImageSource::Path(path).into_image().unwrap();
    assert_eq!(img.format(), ImageFormat::Png);

    let missing = ImageSource::Path(dir.path().join("nope.png")).into_image();
    assert!(matches!(missing, Err(EditorError::Io(_))));
}
