use eframe::egui;
use image::DynamicImage;
use std::sync::Arc;

use super::ie_crop::{extract_region, CropHandler, CropMode, CropRect, InteractionState, SurfaceHandle};
use super::ie_filters::FilterParams;
use super::ie_history::HistoryStack;
use super::ie_image::ImageRef;
use crate::error::{EditorError, Result};

/// Current image plus its undo history.
#[derive(Debug, Default)]
pub struct ImageStore { history: HistoryStack<ImageRef> }

impl ImageStore {
    pub fn new() -> Self { Self::default() }

    /// Replaces everything with `image`; earlier edits are forgotten.
    pub fn load(&mut self, image: ImageRef) { self.history.reset(image); }

    pub fn push(&mut self, image: ImageRef) { self.history.push(image); }
    pub fn undo(&mut self) -> bool { self.history.undo() }
    pub fn current(&self) -> Option<&ImageRef> { self.history.current() }
    pub fn previous(&self) -> Option<&ImageRef> { self.history.previous() }
    pub fn can_undo(&self) -> bool { self.history.can_undo() }
    pub fn len(&self) -> usize { self.history.len() }
    pub fn is_empty(&self) -> bool { self.history.is_empty() }
    pub fn history(&self) -> &HistoryStack<ImageRef> { &self.history }

    /// Pixels of the current image, once its decode has finished.
    pub fn current_pixels(&self) -> Option<Arc<DynamicImage>> { self.current().and_then(ImageRef::pixels) }
}

/// Everything the editor mutates in response to input, independent of any
/// window. The UI feeds it events; tests drive it directly.
pub struct EditSession {
    store: ImageStore,
    crop: CropHandler,
    filters: FilterParams,
}

impl EditSession {
    pub fn new(mode: CropMode, aspect_ratio: Option<f32>) -> Self {
        Self { store: ImageStore::new(), crop: CropHandler::new(mode, aspect_ratio), filters: FilterParams::default() }
    }

    pub fn store(&self) -> &ImageStore { &self.store }
    pub fn crop(&self) -> &CropHandler { &self.crop }
    pub fn crop_mut(&mut self) -> &mut CropHandler { &mut self.crop }
    pub fn filters(&self) -> &FilterParams { &self.filters }
    pub fn filters_mut(&mut self) -> &mut FilterParams { &mut self.filters }
    pub fn current(&self) -> Option<&ImageRef> { self.store.current() }
    pub fn state(&self) -> InteractionState { self.crop.state() }

    /// True when the current image can be drawn, cropped and filtered.
    pub fn is_ready(&self) -> bool { self.store.current().is_some_and(ImageRef::is_decoded) }

    pub fn load(&mut self, image: ImageRef) {
        self.crop.finish();
        self.filters.reset();
        self.store.load(image);
    }

    /// Surface for the current image drawn into `display`, if pixels exist.
    pub fn surface(&self, display: egui::Rect) -> Option<SurfaceHandle> {
        let (w, h) = self.store.current()?.dimensions()?;
        Some(SurfaceHandle::new(display, w, h))
    }

    pub fn set_crop_mode(&mut self, mode: CropMode) { self.crop.set_mode(mode); }

    pub fn arm_crop(&mut self, surface: Option<&SurfaceHandle>) -> bool {
        if !self.is_ready() { return false; }
        self.crop.arm_crop(surface)
    }

    pub fn pointer_down(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> bool { self.crop.pointer_down(surface, pos) }
    pub fn pointer_move(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> { self.crop.pointer_move(surface, pos) }
    pub fn pointer_up(&mut self, surface: &SurfaceHandle, pos: egui::Pos2) -> Option<CropRect> { self.crop.pointer_up(surface, pos) }
    pub fn cancel_crop(&mut self) { self.crop.cancel(); }

    /// Extracts the pending rectangle into a new history entry. Returns
    /// `Ok(false)` when there is nothing to apply.
    pub fn apply_crop(&mut self) -> Result<bool> {
        let rect: CropRect = match self.crop.pending() { Some(r) if r.has_pixels() => r, _ => return Ok(false) };
        let src: Arc<DynamicImage> = match self.store.current_pixels() { Some(p) => p, None => return Ok(false) };
        let cropped: DynamicImage = match extract_region(&src, &rect) { Some(c) => c, None => return Ok(false) };
        let next: ImageRef = ImageRef::from_pixels(cropped)?;
        self.store.push(next);
        self.crop.finish();
        tracing::info!(x = rect.x, y = rect.y, width = rect.width, height = rect.height, "crop applied");
        Ok(true)
    }

    /// Applies the current filter parameters and resets them. Identity
    /// parameters leave the history untouched.
    pub fn apply_filter(&mut self) -> Result<bool> {
        if self.filters.is_identity() || self.store.is_empty() { return Ok(false); }
        let src: Arc<DynamicImage> = self.store.current_pixels().ok_or(EditorError::DecodePending)?;
        let params: FilterParams = self.filters;
        let next: ImageRef = ImageRef::from_pixels(params.apply(&src))?;
        self.store.push(next);
        self.filters.reset();
        tracing::info!(?params, "filter applied");
        Ok(true)
    }

    pub fn undo(&mut self) -> bool {
        if self.crop.state() == InteractionState::Dragging { return false; }
        let undone: bool = self.store.undo();
        if undone {
            self.crop.finish();
            tracing::info!(depth = self.store.len(), "undo");
        }
        undone
    }
}
