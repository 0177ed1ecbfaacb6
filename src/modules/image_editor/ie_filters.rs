use image::{DynamicImage, ImageBuffer, Rgba};

pub const FACTOR_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
pub const BRIGHTNESS_RANGE: std::ops::RangeInclusive<f32> = 0.0..=200.0;

const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Adjustment set applied in one pass. Factors are multiplicative with
/// `1.0` as identity; brightness is a percentage with `100` as identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    vibrance: f32,
    exposure: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self { brightness: 100.0, contrast: 1.0, saturation: 1.0, vibrance: 1.0, exposure: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind { Brightness, Contrast, Saturation, Vibrance, Exposure }

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Brightness, FilterKind::Contrast, FilterKind::Saturation,
        FilterKind::Vibrance, FilterKind::Exposure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Brightness => "Brightness",
            FilterKind::Contrast   => "Contrast",
            FilterKind::Saturation => "Saturation",
            FilterKind::Vibrance   => "Vibrance",
            FilterKind::Exposure   => "Exposure",
        }
    }

    pub fn range(&self) -> std::ops::RangeInclusive<f32> {
        match self { FilterKind::Brightness => BRIGHTNESS_RANGE, _ => FACTOR_RANGE }
    }
}

impl FilterParams {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, kind: FilterKind) -> f32 {
        match kind {
            FilterKind::Brightness => self.brightness,
            FilterKind::Contrast   => self.contrast,
            FilterKind::Saturation => self.saturation,
            FilterKind::Vibrance   => self.vibrance,
            FilterKind::Exposure   => self.exposure,
        }
    }

    /// Stores `value` clamped into the parameter's range. NaN resets the
    /// parameter to its identity value.
    pub fn set(&mut self, kind: FilterKind, value: f32) {
        let range = kind.range();
        let v: f32 = if value.is_nan() { Self::default().get(kind) } else { value.clamp(*range.start(), *range.end()) };
        match kind {
            FilterKind::Brightness => self.brightness = v,
            FilterKind::Contrast   => self.contrast = v,
            FilterKind::Saturation => self.saturation = v,
            FilterKind::Vibrance   => self.vibrance = v,
            FilterKind::Exposure   => self.exposure = v,
        }
    }

    pub fn brightness(&self) -> f32 { self.brightness }
    pub fn contrast(&self) -> f32 { self.contrast }
    pub fn saturation(&self) -> f32 { self.saturation }
    pub fn vibrance(&self) -> f32 { self.vibrance }
    pub fn exposure(&self) -> f32 { self.exposure }

    pub fn with(mut self, kind: FilterKind, value: f32) -> Self { self.set(kind, value); self }

    pub fn is_identity(&self) -> bool { *self == Self::default() }

    pub fn reset(&mut self) { *self = Self::default(); }

    /// Runs every adjustment over `img` in a single pass. Alpha is untouched.
    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        let mut buf: ImageBuffer<Rgba<u8>, Vec<u8>> = img.to_rgba8();
        let brightness: f32 = self.brightness / 100.0;
        // exposure 0..2 maps to -2..+2 stops
        let exposure: f32 = 2.0_f32.powf((self.exposure - 1.0) * 2.0);
        let vibrance: f32 = self.vibrance - 1.0;

        for pixel in buf.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let mut c: [f32; 3] = [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];

            for v in c.iter_mut() {
                *v = (((*v * brightness * exposure) - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0);
            }

            if self.saturation != 1.0 {
                let luma: f32 = c[0] * LUMA_R + c[1] * LUMA_G + c[2] * LUMA_B;
                for v in c.iter_mut() { *v = (luma + (*v - luma) * self.saturation).clamp(0.0, 1.0); }
            }

            if vibrance != 0.0 { c = vibrance_pixel(c, vibrance); }

            pixel.0 = [to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), a];
        }
        DynamicImage::ImageRgba8(buf)
    }
}

fn to_u8(v: f32) -> u8 { (v * 255.0).round().clamp(0.0, 255.0) as u8 }

/// Saturation boost weighted towards muted colours, with skin tones damped.
fn vibrance_pixel(c: [f32; 3], amount: f32) -> [f32; 3] {
    let max: f32 = c[0].max(c[1]).max(c[2]);
    let min: f32 = c[0].min(c[1]).min(c[2]);
    let sat: f32 = if max > 0.0 { (max - min) / max } else { 0.0 };
    let skin: f32 = if c[0] > c[1] && c[1] > c[2] && c[0] > 0.4 && c[1] > 0.2 { 0.5 } else { 1.0 };
    let factor: f32 = 1.0 + (1.0 - sat) * amount * skin;
    let luma: f32 = c[0] * LUMA_R + c[1] * LUMA_G + c[2] * LUMA_B;
    [
        (luma + (c[0] - luma) * factor).clamp(0.0, 1.0),
        (luma + (c[1] - luma) * factor).clamp(0.0, 1.0),
        (luma + (c[2] - luma) * factor).clamp(0.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_ignores_saturation_and_vibrance() {
        let img: DynamicImage = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(2, 2, Rgba([90, 90, 90, 200])));
        let out = FilterParams::new()
            .with(FilterKind::Saturation, 2.0)
            .with(FilterKind::Vibrance, 2.0)
            .apply(&img)
            .to_rgba8();
        assert_eq!(out.get_pixel(1, 1).0, [90, 90, 90, 200]);
    }
}
