#![allow(dead_code)]

use eframe::egui;
use image::{DynamicImage, Rgba, RgbaImage};

use crop_editor::modules::image_editor::{ImageRef, SurfaceHandle};

/// Image whose red channel is the column and green channel the row, so a
/// pixel's origin can be read back after cropping.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255])))
}

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// Already-decoded reference, as produced after a crop or filter.
pub fn decoded_ref(img: DynamicImage) -> ImageRef {
    ImageRef::from_pixels(img).unwrap()
}

/// PNG bytes for `img` wrapped without decoding, as produced by opening a file.
pub fn undecoded_ref(img: DynamicImage) -> ImageRef {
    let encoded = ImageRef::from_pixels(img).unwrap();
    ImageRef::from_bytes(encoded.encoded().to_vec()).unwrap()
}

/// Surface drawing a `w`x`h` image into a display rect at `origin` with size `display`.
pub fn surface(origin: (f32, f32), display: (f32, f32), w: u32, h: u32) -> SurfaceHandle {
    SurfaceHandle::new(egui::Rect::from_min_size(egui::pos2(origin.0, origin.1), egui::vec2(display.0, display.1)), w, h)
}
