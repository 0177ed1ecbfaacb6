use image::{DynamicImage, ImageEncoder, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Bmp,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Webp, ExportFormat::Bmp];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Webp => "WebP",
            ExportFormat::Bmp => "BMP",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Webp => "webp",
            ExportFormat::Bmp => "bmp",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::Webp => ImageFormat::WebP,
            ExportFormat::Bmp => ImageFormat::Bmp,
        }
    }

    /// Picks the format matching a file name's extension, if any.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        let ext: String = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::Webp),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }
}

/// Encodes `img` in memory. JPEG has no alpha channel, so it is flattened to
/// RGB first; `jpeg_quality` only matters for JPEG.
pub fn encode_to_bytes(img: &DynamicImage, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    match format {
        ExportFormat::Jpeg => {
            let rgb: image::RgbImage = img.to_rgb8();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100))
                .write_image(rgb.as_raw(), rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)?;
        }
        ExportFormat::Webp => {
            // lossless encoder only understands 8-bit RGB(A)
            DynamicImage::ImageRgba8(img.to_rgba8()).write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)?;
        }
        ExportFormat::Png | ExportFormat::Bmp => {
            img.write_to(&mut Cursor::new(&mut buf), format.image_format())?;
        }
    }
    Ok(buf)
}

pub fn export_image(img: &DynamicImage, path: &Path, format: ExportFormat, jpeg_quality: u8) -> Result<()> {
    let bytes: Vec<u8> = encode_to_bytes(img, format, jpeg_quality)?;
    write_bytes(path, &bytes)
}

/// Writes an already encoded payload unchanged.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut out: BufWriter<File> = BufWriter::new(File::create(path)?);
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}
