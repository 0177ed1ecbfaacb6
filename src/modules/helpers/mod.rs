pub mod image_export;
pub mod upload;
