mod common;

use std::path::Path;

use crop_editor::modules::helpers::image_export::{encode_to_bytes, export_image, write_bytes, ExportFormat};

use common::{gradient, solid};

#[test]
fn test_format_from_path() {
    assert_eq!(ExportFormat::from_path(Path::new("a.PNG")), Some(ExportFormat::Png));
    assert_eq!(ExportFormat::from_path(Path::new("a.jpeg")), Some(ExportFormat::Jpeg));
    assert_eq!(ExportFormat::from_path(Path::new("a.jpg")), Some(ExportFormat::Jpeg));
    assert_eq!(ExportFormat::from_path(Path::new("dir/a.webp")), Some(ExportFormat::Webp));
    assert_eq!(ExportFormat::from_path(Path::new("a.bmp")), Some(ExportFormat::Bmp));
    assert_eq!(ExportFormat::from_path(Path::new("a.tiff")), None);
    assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
}

#[test]
fn test_every_format_decodes_back() {
    let img = gradient(9, 7);
    for format in ExportFormat::ALL {
        let bytes = encode_to_bytes(&img, format, 90).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), format.image_format(), "{}", format.as_str());
        let back = image::load_from_memory(&bytes).unwrap();
        assert_eq!((back.width(), back.height()), (9, 7));
    }
}

#[test]
fn test_lossless_formats_keep_pixels() {
    let img = solid(4, 4, [10, 20, 30, 128]);
    let png = image::load_from_memory(&encode_to_bytes(&img, ExportFormat::Png, 90).unwrap()).unwrap();
    assert_eq!(png.to_rgba8(), img.to_rgba8());
    let webp = image::load_from_memory(&encode_to_bytes(&img, ExportFormat::Webp, 90).unwrap()).unwrap();
    assert_eq!(webp.to_rgba8(), img.to_rgba8());
}

#[test]
fn test_export_image_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.jpg");
    export_image(&gradient(16, 16), &path, ExportFormat::Jpeg, 75).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_write_bytes_is_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.bin");
    write_bytes(&path, b"\x89PNG payload").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG payload");
}
