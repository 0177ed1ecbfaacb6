use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{sync_channel, Receiver, TryRecvError};
use std::thread;

use crate::error::{EditorError, Result};
use crate::modules::helpers::image_export::{encode_to_bytes, export_image, write_bytes, ExportFormat};
use crate::modules::helpers::upload::{spawn_upload, UploadOutcome, UploadRequest};
use super::ie_crop::SurfaceHandle;
use super::ie_image::ImageRef;
use super::ie_main::{CropCommand, ImageEditor, ImageSource, Panel, ToastKind};

pub(super) const OPEN_FILTER: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

impl ImageEditor {
    pub(super) fn spawn_decode(&self, img: ImageRef) -> Receiver<(ImageRef, Result<()>)> {
        let (tx, rx) = sync_channel(1);
        thread::spawn(move || {
            let result: Result<()> = img.decode().map(|_| ());
            let _ = tx.send((img, result));
        });
        rx
    }

    pub(super) fn check_decode_completion(&mut self) {
        let rx: &Receiver<(ImageRef, Result<()>)> = match &self.decode_rx { Some(rx) => rx, None => return };
        let (img, result) = match rx.try_recv() {
            Ok(msg) => msg,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => { self.decode_rx = None; return; }
        };
        self.decode_rx = None;
        let still_current: bool = self.session.current().is_some_and(|c| c.same_payload(&img));
        match result {
            Ok(()) => {
                if let Some((w, h)) = img.dimensions() { tracing::info!(width = w, height = h, current = still_current, "decode complete"); }
            }
            Err(e) => {
                tracing::error!(error = %e, "decode failed");
                if still_current { self.notify(format!("Could not decode image: {}", e), ToastKind::Error); }
            }
        }
    }

    pub(super) fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new().add_filter("Images", OPEN_FILTER).pick_file() {
            self.open(ImageSource::Path(path));
        }
    }

    pub(super) fn report_failure(&mut self, what: &str, e: EditorError) {
        if matches!(e, EditorError::Cancelled) { return; }
        tracing::error!(error = %e, "{} failed", what);
        self.notify(format!("{} failed: {}", what, e), ToastKind::Error);
    }

    /// Save dialog pre-filled with the download name. The stored payload is
    /// written as-is unless the chosen extension asks for another format.
    pub(super) fn download(&mut self) -> Result<()> {
        let current: ImageRef = self.session.current().cloned().ok_or(EditorError::NoImage)?;
        let path: PathBuf = rfd::FileDialog::new()
            .set_file_name(&self.download_file_name)
            .save_file()
            .ok_or(EditorError::Cancelled)?;
        write_image_ref(&current, &path, self.export_jpeg_quality)?;
        tracing::info!(path = %path.display(), "downloaded image");
        Ok(())
    }

    pub(super) fn export_to_file(&mut self) -> Result<PathBuf> {
        let pixels = self.session.store().current_pixels().ok_or(EditorError::DecodePending)?;
        let stem: &str = Path::new(&self.download_file_name).file_stem().and_then(|s| s.to_str()).unwrap_or("image");
        let filename: String = format!("{}.{}", stem, self.export_format.extension());
        let path: PathBuf = rfd::FileDialog::new()
            .set_file_name(&filename)
            .add_filter(self.export_format.as_str(), &[self.export_format.extension()])
            .save_file()
            .ok_or(EditorError::Cancelled)?;
        export_image(&pixels, &path, self.export_format, self.export_jpeg_quality)?;
        tracing::info!(path = %path.display(), format = self.export_format.as_str(), "exported image");
        self.panel = Panel::None;
        Ok(path)
    }

    pub(super) fn copy_data_url(&mut self, ctx: &egui::Context) {
        if let Some(current) = self.session.current() {
            let url: String = current.to_data_url();
            tracing::debug!(len = url.len(), "copied data URL");
            ctx.copy_text(url);
            self.notify("Copied image as data URL", ToastKind::Info);
        }
    }

    pub(super) fn open_upload_panel(&mut self) {
        if self.upload_url.is_none() || !self.session.is_ready() { return; }
        if self.upload_form.title.is_empty() {
            self.upload_form.title = format!("Image {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
        }
        self.panel = Panel::Upload;
    }

    pub(super) fn start_upload(&mut self) {
        if self.is_uploading() { return; }
        let (url, current) = match (self.upload_url.clone(), self.session.current().cloned()) {
            (Some(u), Some(c)) => (u, c),
            _ => return,
        };
        let ext: &str = current.format().extensions_str().first().copied().unwrap_or("png");
        let stem: &str = Path::new(&self.download_file_name).file_stem().and_then(|s| s.to_str()).unwrap_or("image");
        let request: UploadRequest = UploadRequest {
            bytes: current.encoded().to_vec(),
            file_name: format!("{}.{}", stem, ext),
            mime: current.mime_type().to_string(),
            title: self.upload_form.title.clone(),
            caption: self.upload_form.caption.clone(),
            folder: self.upload_form.folder.clone(),
        };
        tracing::info!(url = %url, bytes = request.bytes.len(), "upload started");
        self.upload_rx = Some(spawn_upload(url, request));
        self.panel = Panel::None;
    }

    pub(super) fn check_upload_completion(&mut self) {
        let rx: &Receiver<UploadOutcome> = match &self.upload_rx { Some(rx) => rx, None => return };
        let outcome: UploadOutcome = match rx.try_recv() {
            Ok(o) => o,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => UploadOutcome::Failure,
        };
        self.upload_rx = None;
        if outcome.is_success() {
            tracing::info!("upload succeeded");
            self.notify("Image uploaded", ToastKind::Info);
            self.upload_form.caption.clear();
            self.upload_form.title.clear();
        } else {
            tracing::warn!("upload failed");
            self.notify("Upload failed. Please try again.", ToastKind::Error);
        }
    }

    pub(super) fn arm_crop(&mut self) {
        if self.session.is_ready() { self.crop_commands.push(CropCommand::Arm); }
    }

    pub(super) fn apply_crop(&mut self) {
        match self.session.apply_crop() {
            Ok(true) => self.fit_on_next_frame = true,
            Ok(false) => {}
            Err(e) => self.report_failure("Crop", e),
        }
    }

    pub(super) fn cancel_crop(&mut self) {
        self.crop_commands.clear();
        self.session.cancel_crop();
    }

    pub(super) fn apply_filter(&mut self) {
        match self.session.apply_filter() {
            Ok(_) => self.panel = Panel::None,
            Err(e) => self.report_failure("Filter", e),
        }
    }

    pub(super) fn undo(&mut self) {
        if self.session.undo() { self.fit_on_next_frame = true; }
    }

    /// Runs queued crop requests against the surface drawn this frame.
    pub(super) fn drain_crop_commands(&mut self, surface: Option<&SurfaceHandle>) {
        for cmd in std::mem::take(&mut self.crop_commands) {
            match cmd {
                CropCommand::Arm => {
                    if self.session.arm_crop(surface) { tracing::debug!(mode = ?self.session.crop().mode(), "crop armed"); }
                }
                CropCommand::Aspect(ratio) => self.session.crop_mut().set_aspect_ratio(ratio, surface),
                CropCommand::BoxSize(w, h) => self.session.crop_mut().set_box_size(w, h, surface),
            }
        }
    }
}

/// Writes `img` to `path`. The original bytes are kept when the extension
/// matches their format (or is unknown); otherwise the pixels are re-encoded.
pub(super) fn write_image_ref(img: &ImageRef, path: &Path, jpeg_quality: u8) -> Result<()> {
    match ExportFormat::from_path(path) {
        Some(fmt) if fmt.image_format() != img.format() => {
            let pixels = img.decode()?;
            write_bytes(path, &encode_to_bytes(&pixels, fmt, jpeg_quality)?)
        }
        _ => write_bytes(path, img.encoded()),
    }
}
