use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use crate::error::{EditorError, Result};

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

struct ImageRefInner {
    encoded: Vec<u8>,
    format: ImageFormat,
    decoded: OnceLock<Arc<DynamicImage>>,
}

/// Encoded image payload shared between the history stack and the canvas.
///
/// The encoded bytes never change after construction. Pixels become readable
/// through [`ImageRef::pixels`] only once [`ImageRef::decode`] has completed,
/// which may happen on a worker thread.
#[derive(Clone)]
pub struct ImageRef { inner: Arc<ImageRefInner> }

impl ImageRef {
    /// Wraps raw file bytes. The format is sniffed from the content; nothing is
    /// decoded yet.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format: ImageFormat = image::guess_format(&bytes)?;
        Ok(Self::with_parts(bytes, format, None))
    }

    /// Encodes freshly produced pixels as PNG. The decoded slot is filled
    /// immediately since the pixels are already in hand.
    pub fn from_pixels(img: DynamicImage) -> Result<Self> {
        let mut buf: Vec<u8> = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(Self::with_parts(buf, ImageFormat::Png, Some(Arc::new(img))))
    }

    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest: &str = url.trim().strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| EditorError::InvalidDataUrl("missing data: prefix".to_string()))?;
        let marker: usize = rest.find(BASE64_MARKER)
            .ok_or_else(|| EditorError::InvalidDataUrl("only base64 payloads are supported".to_string()))?;
        let mime: &str = &rest[..marker];
        if !mime.starts_with("image/") {
            return Err(EditorError::InvalidDataUrl(format!("unsupported media type '{}'", mime)));
        }
        let bytes: Vec<u8> = STANDARD.decode(&rest[marker + BASE64_MARKER.len()..])?;
        Self::from_bytes(bytes)
    }

    fn with_parts(encoded: Vec<u8>, format: ImageFormat, decoded: Option<Arc<DynamicImage>>) -> Self {
        let slot: OnceLock<Arc<DynamicImage>> = OnceLock::new();
        if let Some(img) = decoded { let _ = slot.set(img); }
        Self { inner: Arc::new(ImageRefInner { encoded, format, decoded: slot }) }
    }

    pub fn encoded(&self) -> &[u8] { &self.inner.encoded }
    pub fn format(&self) -> ImageFormat { self.inner.format }
    pub fn mime_type(&self) -> &'static str { self.inner.format.to_mime_type() }

    pub fn to_data_url(&self) -> String {
        format!("{}{}{}{}", DATA_URL_PREFIX, self.mime_type(), BASE64_MARKER, STANDARD.encode(self.encoded()))
    }

    /// Decodes the payload and publishes the pixels. Calling it again after a
    /// successful decode is free.
    pub fn decode(&self) -> Result<Arc<DynamicImage>> {
        if let Some(img) = self.inner.decoded.get() { return Ok(Arc::clone(img)); }
        let img: DynamicImage = image::load_from_memory_with_format(self.encoded(), self.format())?;
        Ok(Arc::clone(self.inner.decoded.get_or_init(|| Arc::new(img))))
    }

    pub fn is_decoded(&self) -> bool { self.inner.decoded.get().is_some() }

    /// Decoded pixels, or `None` while the decode has not completed.
    pub fn pixels(&self) -> Option<Arc<DynamicImage>> { self.inner.decoded.get().cloned() }

    /// Natural size in pixels, known once decoded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.inner.decoded.get().map(|img| (img.width(), img.height()))
    }

    pub fn same_payload(&self, other: &ImageRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.encoded() == other.encoded()
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool { self.same_payload(other) }
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRef")
            .field("format", &self.inner.format)
            .field("bytes", &self.inner.encoded.len())
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn pixels_unavailable_until_decoded() {
        let png: ImageRef = ImageRef::from_pixels(DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])))).unwrap();
        let raw: ImageRef = ImageRef::from_bytes(png.encoded().to_vec()).unwrap();
        assert!(raw.pixels().is_none());
        assert_eq!(raw.dimensions(), None);
        raw.decode().unwrap();
        assert_eq!(raw.dimensions(), Some((3, 2)));
    }

    #[test]
    fn rejects_non_image_data_url() {
        assert!(ImageRef::from_data_url("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(ImageRef::from_data_url("https://example.com/a.png").is_err());
    }
}
