use eframe::egui;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::config::AppSettings;
use crate::error::Result;
use crate::modules::helpers::image_export::ExportFormat;
use crate::modules::helpers::upload::UploadOutcome;
use crate::modules::{EditorModule, MenuAction, MenuContribution, MenuItem};
use crate::style::ThemeMode;
use super::ie_crop::{InteractionState, CROP_PRESETS};
use super::ie_image::ImageRef;
use super::ie_store::EditSession;

pub(super) const TOAST_SECONDS: f64 = 4.0;
pub(super) const MAX_TOASTS: usize = 4;
pub(super) const DEFAULT_CUSTOM_SIZE: f32 = 200.0;

/// Where an image comes from before it is turned into an [`ImageRef`].
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes { bytes: Vec<u8>, name: String },
    DataUrl(String),
}

impl ImageSource {
    /// Command-line form: a `data:` URL or a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.trim_start().starts_with("data:") { ImageSource::DataUrl(arg.to_string()) }
        else { ImageSource::Path(PathBuf::from(arg)) }
    }

    pub fn display_name(&self) -> String {
        match self {
            ImageSource::Path(p) => p.file_name().and_then(|n| n.to_str()).unwrap_or("image").to_string(),
            ImageSource::Bytes { name, .. } => name.clone(),
            ImageSource::DataUrl(_) => "data URL".to_string(),
        }
    }

    /// Reads and sniffs the payload. Decoding happens later.
    pub fn into_image(self) -> Result<ImageRef> {
        match self {
            ImageSource::Path(p) => ImageRef::from_bytes(std::fs::read(&p)?),
            ImageSource::Bytes { bytes, .. } => ImageRef::from_bytes(bytes),
            ImageSource::DataUrl(url) => ImageRef::from_data_url(&url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Panel { None, Filters, Export, Upload }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ToastKind { Info, Error }

#[derive(Debug, Clone)]
pub(super) struct Toast { pub text: String, pub kind: ToastKind, pub expires_at: f64 }

/// Crop requests that need this frame's surface; drained by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum CropCommand { Arm, Aspect(Option<f32>), BoxSize(f32, f32) }

pub(super) struct UploadForm { pub title: String, pub caption: String, pub folder: String }

pub struct ImageEditor {
    pub(super) session: EditSession,
    pub(super) source_name: Option<String>,
    pub(super) texture: Option<egui::TextureHandle>,
    pub(super) texture_for: Option<ImageRef>,
    pub(super) zoom: f32,
    pub(super) pan: egui::Vec2,
    pub(super) fit_on_next_frame: bool,
    pub(super) canvas_rect: Option<egui::Rect>,
    pub(super) image_rect: Option<egui::Rect>,
    pub(super) panel: Panel,
    pub(super) panel_rect: Option<egui::Rect>,
    pub(super) custom_w: f32,
    pub(super) custom_h: f32,
    pub(super) selected_preset: Option<usize>,
    pub(super) export_format: ExportFormat,
    pub(super) export_jpeg_quality: u8,
    pub(super) download_file_name: String,
    pub(super) upload_url: Option<String>,
    pub(super) upload_form: UploadForm,
    pub(super) upload_rx: Option<Receiver<UploadOutcome>>,
    pub(super) decode_rx: Option<Receiver<(ImageRef, Result<()>)>>,
    pub(super) toasts: VecDeque<Toast>,
    pub(super) pending_toasts: Vec<(String, ToastKind)>,
    pub(super) crop_commands: Vec<CropCommand>,
    pub(super) copy_pending: bool,
}

impl ImageEditor {
    pub fn new(settings: &AppSettings) -> Self {
        let aspect: Option<f32> = settings.aspect_ratio();
        Self {
            session: EditSession::new(settings.crop_mode, aspect),
            source_name: None,
            texture: None, texture_for: None,
            zoom: 1.0, pan: egui::Vec2::ZERO, fit_on_next_frame: true,
            canvas_rect: None, image_rect: None,
            panel: Panel::None, panel_rect: None,
            custom_w: DEFAULT_CUSTOM_SIZE, custom_h: DEFAULT_CUSTOM_SIZE,
            selected_preset: aspect.and_then(|r| CROP_PRESETS.iter().position(|p| (p.ratio - r).abs() < 1e-3)),
            export_format: ExportFormat::Png,
            export_jpeg_quality: 90,
            download_file_name: settings.download_file_name.clone(),
            upload_url: settings.upload_url.clone(),
            upload_form: UploadForm { title: String::new(), caption: String::new(), folder: String::new() },
            upload_rx: None,
            decode_rx: None,
            toasts: VecDeque::new(),
            pending_toasts: Vec::new(),
            crop_commands: Vec::new(),
            copy_pending: false,
        }
    }

    pub fn session(&self) -> &EditSession { &self.session }
    pub fn has_image(&self) -> bool { self.session.current().is_some() }
    pub fn is_decoding(&self) -> bool { self.decode_rx.is_some() }
    pub fn is_uploading(&self) -> bool { self.upload_rx.is_some() }

    /// Replaces the current image and history with `source`. The decode runs
    /// in the background; editing actions stay disabled until it lands.
    pub fn open(&mut self, source: ImageSource) {
        let name: String = source.display_name();
        match source.into_image() {
            Ok(img) => {
                tracing::info!(source = %name, format = ?img.format(), bytes = img.encoded().len(), "image loaded");
                self.session.load(img.clone());
                self.source_name = Some(name);
                self.texture = None;
                self.texture_for = None;
                self.panel = Panel::None;
                self.fit_on_next_frame = true;
                self.decode_rx = Some(self.spawn_decode(img));
            }
            Err(e) => {
                tracing::error!(source = %name, error = %e, "failed to open image");
                self.notify(format!("Could not open {}: {}", name, e), ToastKind::Error);
            }
        }
    }

    pub(super) fn notify(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.pending_toasts.push((text.into(), kind));
    }

    pub(super) fn flush_toasts(&mut self, now: f64) {
        for (text, kind) in self.pending_toasts.drain(..) {
            self.toasts.push_back(Toast { text, kind, expires_at: now + TOAST_SECONDS });
        }
        while self.toasts.len() > MAX_TOASTS { self.toasts.pop_front(); }
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Uploads the current texture when the visible image changed.
    pub(super) fn ensure_texture(&mut self, ctx: &egui::Context) {
        let current: ImageRef = match self.session.current() { Some(c) => c.clone(), None => { self.texture = None; return; } };
        if self.texture.is_some() && self.texture_for.as_ref().is_some_and(|t| t.same_payload(&current)) { return; }
        let pixels: std::sync::Arc<image::DynamicImage> = match current.pixels() { Some(p) => p, None => return };
        let image: egui::ColorImage = super::ie_helpers::to_color_image(&pixels);
        match &mut self.texture {
            Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
            None => self.texture = Some(ctx.load_texture("crop_editor_image", image, egui::TextureOptions::LINEAR)),
        }
        self.texture_for = Some(current);
        self.fit_on_next_frame = true;
    }

    pub(super) fn fit_image(&mut self) {
        let (canvas, size) = match (self.canvas_rect, self.session.current().and_then(ImageRef::dimensions)) {
            (Some(c), Some(s)) => (c, s),
            _ => return,
        };
        self.zoom = super::ie_helpers::fit_zoom(canvas, size);
        self.pan = egui::Vec2::ZERO;
    }

    pub(super) fn zoom_by(&mut self, factor: f32) { self.zoom = (self.zoom * factor).clamp(0.01, 50.0); }

    pub(super) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let typing: bool = ctx.wants_keyboard_input();
        let mut actions: Vec<MenuAction> = Vec::new();
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z) { actions.push(MenuAction::Undo); }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) { actions.push(MenuAction::Download); }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) { actions.push(MenuAction::Open); }
            if typing { return; }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::C) { actions.push(MenuAction::Crop); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Enter) { actions.push(MenuAction::ApplyCrop); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) { actions.push(MenuAction::CancelCrop); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Num0) { actions.push(MenuAction::Fit); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Plus) || i.consume_key(egui::Modifiers::NONE, egui::Key::Equals) {
                actions.push(MenuAction::ZoomIn);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Minus) { actions.push(MenuAction::ZoomOut); }
        });
        for action in actions { self.handle_menu_action(action); }
    }

    fn crop_active(&self) -> bool { self.session.state() != InteractionState::Idle }
}

impl EditorModule for ImageEditor {
    fn get_title(&self) -> String {
        let name: &str = self.source_name.as_deref().unwrap_or("No image");
        let edits: usize = self.session.store().len().saturating_sub(1);
        if edits > 0 { format!("{} ({} edit{})", name, edits, if edits == 1 { "" } else { "s" }) } else { name.to_string() }
    }

    fn save(&mut self) -> Result<()> { self.download() }

    fn get_menu_contributions(&self) -> MenuContribution {
        let ready: bool = self.session.is_ready();
        let crop_active: bool = self.crop_active();
        let can_upload: bool = ready && self.upload_url.is_some() && !self.is_uploading();
        MenuContribution {
            file_items: vec![
                (MenuItem::new("Open...", Some("Ctrl+O"), true), MenuAction::Open),
                (MenuItem::new("Download", Some("Ctrl+S"), self.has_image()), MenuAction::Download),
                (MenuItem::new("Export As...", None, ready), MenuAction::Export),
                (MenuItem::new("Upload...", None, can_upload), MenuAction::Upload),
                (MenuItem::separator(), MenuAction::None),
                (MenuItem::new("Copy as Data URL", None, self.has_image()), MenuAction::CopyDataUrl),
            ],
            edit_items: vec![
                (MenuItem::new("Undo", Some("Ctrl+Z"), self.session.store().can_undo()), MenuAction::Undo),
                (MenuItem::separator(), MenuAction::None),
                (MenuItem::new("Crop", Some("C"), ready && !crop_active), MenuAction::Crop),
                (MenuItem::new("Apply Crop", Some("Enter"), self.session.crop().pending().is_some()), MenuAction::ApplyCrop),
                (MenuItem::new("Cancel Crop", Some("Esc"), crop_active), MenuAction::CancelCrop),
                (MenuItem::new("Filters...", None, ready), MenuAction::Filters),
            ],
            view_items: vec![
                (MenuItem::new("Zoom In", Some("+"), ready), MenuAction::ZoomIn),
                (MenuItem::new("Zoom Out", Some("-"), ready), MenuAction::ZoomOut),
                (MenuItem::new("Fit", Some("0"), ready), MenuAction::Fit),
            ],
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction) -> bool {
        match action {
            MenuAction::Open => { self.open_dialog(); true }
            MenuAction::Download => {
                if let Err(e) = self.download() { self.report_failure("Download", e); }
                true
            }
            MenuAction::Export => { if self.session.is_ready() { self.panel = Panel::Export; } true }
            MenuAction::Upload => { self.open_upload_panel(); true }
            MenuAction::CopyDataUrl => { self.copy_pending = true; true }
            MenuAction::Undo => { self.undo(); true }
            MenuAction::Crop => { self.arm_crop(); true }
            MenuAction::ApplyCrop => { self.apply_crop(); true }
            MenuAction::CancelCrop => { self.cancel_crop(); true }
            MenuAction::Filters => { if self.session.is_ready() { self.panel = Panel::Filters; } true }
            MenuAction::ZoomIn => { self.zoom_by(1.25); true }
            MenuAction::ZoomOut => { self.zoom_by(1.0 / 1.25); true }
            MenuAction::Fit => { self.fit_image(); true }
            MenuAction::None => false,
        }
    }

    fn apply_settings(&mut self, settings: &AppSettings) {
        self.session.set_crop_mode(settings.crop_mode);
        if !self.session.crop().is_active() {
            self.session.crop_mut().set_aspect_ratio(settings.aspect_ratio(), None);
            self.selected_preset = settings.aspect_ratio().and_then(|r| CROP_PRESETS.iter().position(|p| (p.ratio - r).abs() < 1e-3));
        }
        self.download_file_name = settings.download_file_name.clone();
        self.upload_url = settings.upload_url.clone();
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let theme: ThemeMode = ThemeMode::from_visuals(ui.visuals());

        self.handle_keyboard(ctx);
        self.check_decode_completion();
        self.check_upload_completion();
        if self.copy_pending { self.copy_pending = false; self.copy_data_url(ctx); }
        self.flush_toasts(ctx.input(|i| i.time));
        self.ensure_texture(ctx);

        if self.is_decoding() || self.is_uploading() { ctx.request_repaint(); }
        if !self.toasts.is_empty() { ctx.request_repaint_after(std::time::Duration::from_millis(250)); }

        self.render_toolbar(ui, theme);
        ui.add_space(4.0);
        self.render_options_bar(ui, theme);
        ui.add_space(4.0);

        self.render_panel(ui, ctx, theme);
        self.render_canvas(ui, ctx);
        self.render_toasts(ctx, theme);
    }
}
