use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image is still decoding")]
    DecodePending,

    #[error("No image loaded")]
    NoImage,

    #[error("Upload failed")]
    Upload,

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, EditorError>;
