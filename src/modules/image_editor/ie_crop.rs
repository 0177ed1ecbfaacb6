use eframe::egui;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::ie_helpers::{crop_hit_handle, cursor_for_handle, cursor_for_state};

/// Width in screen points of the box the widget strategy proposes on arm.
pub const DEFAULT_BOX_DISPLAY_WIDTH: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectPreset { pub label: &'static str, pub ratio: f32 }

pub const CROP_PRESETS: [AspectPreset; 4] = [
    AspectPreset { label: "4:3", ratio: 4.0 / 3.0 },
    AspectPreset { label: "16:9", ratio: 16.0 / 9.0 },
    AspectPreset { label: "1:1", ratio: 1.0 },
    AspectPreset { label: "3:4", ratio: 3.0 / 4.0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Free rectangle dragged directly over the canvas.
    #[default]
    Manual,
    /// Resizable crop box with handles and aspect-ratio presets.
    Widget,
}

impl CropMode {
    pub fn label(&self) -> &'static str {
        match self {
            CropMode::Manual => "Freehand",
            CropMode::Widget => "Crop Box",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    CropArmed,
    Dragging,
}

/// Selection in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRect { pub x: f32, pub y: f32, pub width: f32, pub height: f32 }

/// Integer pixel window of a [`CropRect`]. `x`/`y` may be negative when the
/// selection started outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion { pub x: i64, pub y: i64, pub width: u32, pub height: u32 }

impl CropRect {
    pub const ZERO: CropRect = CropRect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self { Self { x, y, width, height } }

    pub fn normalize(a: egui::Pos2, b: egui::Pos2) -> Self {
        Self { x: a.x.min(b.x), y: a.y.min(b.y), width: (a.x - b.x).abs(), height: (a.y - b.y).abs() }
    }

    pub fn is_valid(&self) -> bool { self.width > 0.0 && self.height > 0.0 }

    /// Still covers at least one whole pixel once rounded.
    pub fn has_pixels(&self) -> bool { self.pixel_region().is_some() }

    pub fn min(&self) -> egui::Pos2 { egui::pos2(self.x, self.y) }
    pub fn max(&self) -> egui::Pos2 { egui::pos2(self.x + self.width, self.y + self.height) }
    pub fn center(&self) -> egui::Pos2 { egui::pos2(self.x + self.width / 2.0, self.y + self.height / 2.0) }

    pub fn from_center_size(center: egui::Pos2, width: f32, height: f32) -> Self {
        Self { x: center.x - width / 2.0, y: center.y - height / 2.0, width, height }
    }

    pub fn pixel_region(&self) -> Option<PixelRegion> {
        if !self.is_valid() { return None; }
        let width: u32 = self.width.round() as u32;
        let height: u32 = self.height.round() as u32;
        if width == 0 || height == 0 { return None; }
        Some(PixelRegion { x: self.x.round() as i64, y: self.y.round() as i64, width, height })
    }

    /// Intersects with `[0, w] x [0, h]`, then restores `aspect` by shrinking
    /// the longer side.
    pub fn fit_within(&self, w: f32, h: f32, aspect: Option<f32>) -> CropRect {
        let x0: f32 = self.x.clamp(0.0, w);
        let y0: f32 = self.y.clamp(0.0, h);
        let x1: f32 = (self.x + self.width).clamp(0.0, w);
        let y1: f32 = (self.y + self.height).clamp(0.0, h);
        let (mut cw, mut ch) = (x1 - x0, y1 - y0);
        if let Some(r) = aspect.filter(|r| r.is_finite() && *r > 0.0) {
            if cw > ch * r { cw = ch * r; } else { ch = cw / r; }
        }
        CropRect { x: x0, y: y0, width: cw, height: ch }
    }
}

/// Copies the part of `rect` that lies on `src` into a standalone image.
/// Returns `None` when that overlap rounds to zero pixels.
pub fn extract_region(src: &DynamicImage, rect: &CropRect) -> Option<DynamicImage> {
    let (sw, sh) = (src.width(), src.height());
    let region: PixelRegion = rect.fit_within(sw as f32, sh as f32, None).pixel_region()?;
    let (x, y) = (region.x.clamp(0, sw as i64) as u32, region.y.clamp(0, sh as i64) as u32);
    let width: u32 = region.width.min(sw - x);
    let height: u32 = region.height.min(sh - y);
    if width == 0 || height == 0 { return None; }
    Some(src.crop_imm(x, y, width, height))
}

/// Where the image is drawn this frame, paired with its natural size.
/// Built fresh by the canvas for every event, never stored across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHandle { pub display: egui::Rect, pub source_size: egui::Vec2 }

impl SurfaceHandle {
    pub fn new(display: egui::Rect, source_width: u32, source_height: u32) -> Self {
        Self { display, source_size: egui::vec2(source_width as f32, source_height as f32) }
    }

    pub fn is_usable(&self) -> bool { self.display.width() > 0.0 && self.display.height() > 0.0 }

    pub fn scale(&self) -> egui::Vec2 {
        egui::vec2(self.source_size.x / self.display.width(), self.source_size.y / self.display.height())
    }

    pub fn to_source(&self, p: egui::Pos2) -> egui::Pos2 {
        let s: egui::Vec2 = self.scale();
        egui::pos2((p.x - self.display.min.x) * s.x, (p.y - self.display.min.y) * s.y)
    }

    pub fn to_display(&self, p: egui::Pos2) -> egui::Pos2 {
        let s: egui::Vec2 = self.scale();
        egui::pos2(self.display.min.x + p.x / s.x, self.display.min.y + p.y / s.y)
    }

    pub fn rect_to_display(&self, r: &CropRect) -> egui::Rect {
        egui::Rect::from_min_max(self.to_display(r.min()), self.to_display(r.max()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropHandle { Move, N, S, E, W, NE, NW, SE, SW }

/// Geometry behind a crop gesture. The handler owns the state machine; a
/// strategy only turns pointer positions into rectangles.
pub trait CropStrategy: Send {
    fn mode(&self) -> CropMode;
    /// Crop mode was armed. Returns the candidate offered straight away, if any.
    fn begin(&mut self, surface: &SurfaceHandle) -> Option<CropRect>;
    fn press(&mut self, surface: &SurfaceHandle, pos: egui::Pos2);
    /// Live preview while the pointer is held.
    fn drag(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect>;
    /// Final rectangle of the gesture; `None` when it is degenerate.
    fn release(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect>;
    fn reset(&mut self);

    fn supports_aspect(&self) -> bool { false }
    fn set_aspect_ratio(&mut self, _ratio: Option<f32>, _surface: Option<&SurfaceHandle>) -> Option<CropRect> { None }
    fn set_box_size(&mut self, _width: f32, _height: f32, _surface: Option<&SurfaceHandle>) -> Option<CropRect> { None }
    fn hover_cursor(&self, _surface: &SurfaceHandle, _pos: egui::Pos2) -> Option<egui::CursorIcon> { None }
}

/// Rectangle dragged from the press point to the release point, kept on
/// the image.
#[derive(Debug, Default)]
pub struct ManualCrop { start: egui::Pos2 }

impl ManualCrop {
    fn clamp_to_image(surface: &SurfaceHandle, p: egui::Pos2) -> egui::Pos2 {
        egui::pos2(p.x.clamp(0.0, surface.source_size.x), p.y.clamp(0.0, surface.source_size.y))
    }

    fn span(&self, surface: &SurfaceHandle, pos: egui::Pos2) -> CropRect {
        CropRect::normalize(self.start, surface.to_source(pos))
            .fit_within(surface.source_size.x, surface.source_size.y, None)
    }
}

impl CropStrategy for ManualCrop {
    fn mode(&self) -> CropMode { CropMode::Manual }

    fn begin(&mut self, _surface: &SurfaceHandle) -> Option<CropRect> {
        self.start = egui::Pos2::ZERO;
        None
    }

    fn press(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) {
        self.start = Self::clamp_to_image(surface, surface.to_source(pos));
    }

    fn drag(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> {
        Some(self.span(surface, pos))
    }

    fn release(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> {
        Some(self.span(surface, pos)).filter(CropRect::has_pixels)
    }

    fn reset(&mut self) { self.start = egui::Pos2::ZERO; }
}

#[derive(Debug, Clone, Copy)]
enum BoxGesture {
    Handle { handle: CropHandle, grab: egui::Pos2, orig: CropRect },
    NewBox { origin: egui::Pos2 },
}

/// Crop box with resize handles that keeps an optional aspect ratio.
#[derive(Debug)]
pub struct WidgetCrop {
    crop_box: Option<CropRect>,
    aspect: Option<f32>,
    gesture: Option<BoxGesture>,
    before_gesture: Option<CropRect>,
}

impl WidgetCrop {
    pub fn new(aspect: Option<f32>) -> Self {
        Self { crop_box: None, aspect: aspect.filter(|r| r.is_finite() && *r > 0.0), gesture: None, before_gesture: None }
    }

    pub fn crop_box(&self) -> Option<CropRect> { self.crop_box }

    fn bounds(surface: &SurfaceHandle) -> (f32, f32) { (surface.source_size.x, surface.source_size.y) }

    fn sized_from_anchor(&self, anchor: egui::Pos2, pointer: egui::Pos2) -> CropRect {
        let (mut dx, mut dy) = (pointer.x - anchor.x, pointer.y - anchor.y);
        if let Some(r) = self.aspect {
            if dx.abs() >= dy.abs() * r { dy = dy.signum() * dx.abs() / r; }
            else { dx = dx.signum() * dy.abs() * r; }
        }
        CropRect::normalize(anchor, anchor + egui::vec2(dx, dy))
    }

    fn resize(&self, handle: CropHandle, orig: CropRect, grab: egui::Pos2, p: egui::Pos2, w: f32, h: f32) -> CropRect {
        let (min, max) = (orig.min(), orig.max());
        let next: CropRect = match handle {
            CropHandle::Move => {
                let delta: egui::Vec2 = p - grab;
                let x: f32 = (orig.x + delta.x).clamp(0.0, (w - orig.width).max(0.0));
                let y: f32 = (orig.y + delta.y).clamp(0.0, (h - orig.height).max(0.0));
                return CropRect { x, y, ..orig };
            }
            CropHandle::NW => self.sized_from_anchor(max, p),
            CropHandle::NE => self.sized_from_anchor(egui::pos2(min.x, max.y), p),
            CropHandle::SW => self.sized_from_anchor(egui::pos2(max.x, min.y), p),
            CropHandle::SE => self.sized_from_anchor(min, p),
            CropHandle::N | CropHandle::S => {
                let anchor_y: f32 = if handle == CropHandle::N { max.y } else { min.y };
                let height: f32 = (p.y - anchor_y).abs();
                match self.aspect {
                    Some(r) => CropRect { x: orig.center().x - height * r / 2.0, y: anchor_y.min(p.y), width: height * r, height },
                    None => CropRect { x: orig.x, y: anchor_y.min(p.y), width: orig.width, height },
                }
            }
            CropHandle::E | CropHandle::W => {
                let anchor_x: f32 = if handle == CropHandle::W { max.x } else { min.x };
                let width: f32 = (p.x - anchor_x).abs();
                match self.aspect {
                    Some(r) => CropRect { x: anchor_x.min(p.x), y: orig.center().y - width / r / 2.0, width, height: width / r },
                    None => CropRect { x: anchor_x.min(p.x), y: orig.y, width, height: orig.height },
                }
            }
        };
        next.fit_within(w, h, self.aspect)
    }

    fn track(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> {
        let p: egui::Pos2 = surface.to_source(pos);
        let (w, h) = Self::bounds(surface);
        let next: CropRect = match self.gesture? {
            BoxGesture::Handle { handle, grab, orig } => self.resize(handle, orig, grab, p, w, h),
            BoxGesture::NewBox { origin } => self.sized_from_anchor(origin, p).fit_within(w, h, self.aspect),
        };
        self.crop_box = Some(next);
        self.crop_box
    }
}

impl CropStrategy for WidgetCrop {
    fn mode(&self) -> CropMode { CropMode::Widget }

    fn begin(&mut self, surface: &SurfaceHandle) -> Option<CropRect> {
        let (w, h) = Self::bounds(surface);
        let width: f32 = DEFAULT_BOX_DISPLAY_WIDTH * surface.scale().x;
        let height: f32 = width / self.aspect.unwrap_or(1.0);
        self.gesture = None;
        self.before_gesture = None;
        self.crop_box = Some(CropRect::new(0.0, 0.0, width, height).fit_within(w, h, self.aspect));
        self.crop_box.filter(CropRect::has_pixels)
    }

    fn press(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) {
        let grab: egui::Pos2 = surface.to_source(pos);
        self.before_gesture = self.crop_box;
        let hit: Option<CropHandle> = self.crop_box
            .and_then(|b| crop_hit_handle(pos, surface.rect_to_display(&b)));
        self.gesture = Some(match (hit, self.crop_box) {
            (Some(handle), Some(orig)) => BoxGesture::Handle { handle, grab, orig },
            _ => BoxGesture::NewBox { origin: grab },
        });
    }

    fn drag(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> { self.track(surface, pos) }

    fn release(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> {
        let tracked: Option<CropRect> = self.track(surface, pos);
        self.gesture = None;
        match tracked.filter(CropRect::has_pixels) {
            Some(r) => Some(r),
            None => { self.crop_box = self.before_gesture; None }
        }
    }

    fn reset(&mut self) {
        self.crop_box = None;
        self.gesture = None;
        self.before_gesture = None;
    }

    fn supports_aspect(&self) -> bool { true }

    fn set_aspect_ratio(&mut self, ratio: Option<f32>, surface: Option<&SurfaceHandle>) -> Option<CropRect> {
        self.aspect = ratio.filter(|r| r.is_finite() && *r > 0.0);
        let (r, current, surface) = match (self.aspect, self.crop_box, surface) {
            (Some(r), Some(b), Some(s)) => (r, b, s),
            _ => return self.crop_box,
        };
        let (w, h) = Self::bounds(surface);
        let major: f32 = current.width.max(current.height);
        let (bw, bh) = if r >= 1.0 { (major, major / r) } else { (major * r, major) };
        let reshaped: CropRect = CropRect::from_center_size(current.center(), bw, bh);
        let x: f32 = reshaped.x.clamp(0.0, (w - reshaped.width).max(0.0));
        let y: f32 = reshaped.y.clamp(0.0, (h - reshaped.height).max(0.0));
        self.crop_box = Some(CropRect { x, y, ..reshaped }.fit_within(w, h, self.aspect));
        self.crop_box
    }

    fn set_box_size(&mut self, width: f32, height: f32, surface: Option<&SurfaceHandle>) -> Option<CropRect> {
        self.aspect = None;
        let requested: CropRect = CropRect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
        self.crop_box = Some(match surface {
            Some(s) => { let (w, h) = Self::bounds(s); requested.fit_within(w, h, None) }
            None => requested,
        });
        self.crop_box.filter(CropRect::has_pixels)
    }

    fn hover_cursor(&self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<egui::CursorIcon> {
        let b: CropRect = self.crop_box?;
        crop_hit_handle(pos, surface.rect_to_display(&b)).map(cursor_for_handle)
    }
}

pub fn strategy_for(mode: CropMode, aspect: Option<f32>) -> Box<dyn CropStrategy> {
    match mode {
        CropMode::Manual => Box::new(ManualCrop::default()),
        CropMode::Widget => Box::new(WidgetCrop::new(aspect)),
    }
}

/// Crop-mode state machine shared by both strategies.
pub struct CropHandler {
    state: InteractionState,
    strategy: Box<dyn CropStrategy>,
    preview: Option<CropRect>,
    pending: Option<CropRect>,
    aspect_ratio: Option<f32>,
}

impl CropHandler {
    pub fn new(mode: CropMode, aspect_ratio: Option<f32>) -> Self {
        Self {
            state: InteractionState::Idle,
            strategy: strategy_for(mode, aspect_ratio),
            preview: None,
            pending: None,
            aspect_ratio,
        }
    }

    pub fn mode(&self) -> CropMode { self.strategy.mode() }

    pub fn set_mode(&mut self, mode: CropMode) {
        if mode == self.mode() { return; }
        self.strategy = strategy_for(mode, self.aspect_ratio);
        self.finish();
    }

    pub fn state(&self) -> InteractionState { self.state }
    pub fn is_active(&self) -> bool { self.state != InteractionState::Idle }
    pub fn pending(&self) -> Option<CropRect> { self.pending }
    pub fn aspect_ratio(&self) -> Option<f32> { self.aspect_ratio }
    pub fn supports_aspect(&self) -> bool { self.strategy.supports_aspect() }

    /// Rectangle to outline on the overlay: the live drag, else the candidate.
    pub fn visible_rect(&self) -> Option<CropRect> {
        if self.state == InteractionState::Dragging { self.preview } else { self.pending }
    }

    /// Enters crop mode. Without a decoded image there is no surface and the
    /// call does nothing.
    pub fn arm_crop(&mut self, surface: Option<&SurfaceHandle>) -> bool {
        let surface: &SurfaceHandle = match surface { Some(s) if s.is_usable() => s, _ => return false };
        self.preview = None;
        self.pending = self.strategy.begin(surface);
        self.state = InteractionState::CropArmed;
        true
    }

    pub fn pointer_down(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> bool {
        if self.state != InteractionState::CropArmed || !surface.is_usable() { return false; }
        self.strategy.press(surface, pos);
        self.preview = None;
        self.state = InteractionState::Dragging;
        true
    }

    pub fn pointer_move(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> {
        if self.state != InteractionState::Dragging || !surface.is_usable() { return None; }
        self.preview = self.strategy.drag(surface, pos);
        self.preview
    }

    /// Ends the gesture. A rectangle covering no whole pixel yields no
    /// candidate and leaves any earlier candidate in place.
    pub fn pointer_up(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> {
        if self.state != InteractionState::Dragging || !surface.is_usable() { return None; }
        self.state = InteractionState::CropArmed;
        self.preview = None;
        let rect: Option<CropRect> = self.strategy.release(surface, pos);
        if rect.is_some() { self.pending = rect; }
        rect
    }

    pub fn set_aspect_ratio(&mut self, ratio: Option<f32>, surface: Option<&SurfaceHandle>) {
        let ratio: Option<f32> = ratio.filter(|r| r.is_finite() && *r > 0.0);
        self.aspect_ratio = ratio;
        if !self.strategy.supports_aspect() { return; }
        let reshaped: Option<CropRect> = self.strategy.set_aspect_ratio(ratio, surface);
        if self.is_active() { self.pending = reshaped.filter(CropRect::has_pixels); }
    }

    pub fn set_box_size(&mut self, width: f32, height: f32, surface: Option<&SurfaceHandle>) {
        if !self.is_active() || !self.strategy.supports_aspect() { return; }
        self.aspect_ratio = None;
        self.pending = self.strategy.set_box_size(width, height, surface);
    }

    /// Back to `Idle` with no candidate; used after apply and on cancel.
    pub fn finish(&mut self) {
        self.state = InteractionState::Idle;
        self.preview = None;
        self.pending = None;
        self.strategy.reset();
    }

    pub fn cancel(&mut self) { self.finish(); }

    pub fn cursor(&self, surface: Option<&SurfaceHandle>, hover: Option<egui::Pos2>) -> egui::CursorIcon {
        if self.state == InteractionState::CropArmed {
            if let (Some(s), Some(p)) = (surface, hover) {
                if let Some(icon) = self.strategy.hover_cursor(s, p) { return icon; }
            }
        }
        cursor_for_state(self.state)
    }
}
