use crop_editor::modules::helpers::upload::{UploadOutcome, UploadRequest};

fn request(mime: &str) -> UploadRequest {
    UploadRequest {
        bytes: vec![0x89, b'P', b'N', b'G'],
        file_name: "image.png".to_string(),
        mime: mime.to_string(),
        title: "Image 2026-01-01 10:00".to_string(),
        caption: "a caption".to_string(),
        folder: "holiday".to_string(),
    }
}

#[test]
fn test_only_2xx_succeeds() {
    for status in [200, 201, 204, 299] {
        assert!(UploadOutcome::from_status(status).is_success(), "{}", status);
    }
    for status in [0, 199, 301, 400, 404, 500, 503] {
        assert_eq!(UploadOutcome::from_status(status), UploadOutcome::Failure, "{}", status);
    }
}

#[test]
fn test_form_builds_for_image_mime() {
    assert!(request("image/png").into_form().is_ok());
}

#[test]
fn test_form_rejects_bad_mime() {
    assert!(request("not a mime").into_form().is_err());
}
