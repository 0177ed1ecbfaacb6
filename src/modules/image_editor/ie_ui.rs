use eframe::egui;

use crate::modules::helpers::image_export::ExportFormat;
use crate::modules::MenuAction;
use crate::modules::EditorModule;
use crate::style::{self, ColorPalette, ThemeMode};
use super::ie_crop::{CropRect, InteractionState, SurfaceHandle, CROP_PRESETS};
use super::ie_filters::FilterKind;
use super::ie_helpers::{dim_outside, drag_start_point, draw_crop_handles};
use super::ie_main::{CropCommand, ImageEditor, Panel, ToastKind};

impl ImageEditor {
    pub(super) fn render_toolbar(&mut self, ui: &mut egui::Ui, theme: ThemeMode) {
        let (bg, border) = if matches!(theme, ThemeMode::Dark) {
            (ColorPalette::ZINC_800, ColorPalette::ZINC_700)
        } else {
            (ColorPalette::GRAY_50, ColorPalette::GRAY_300)
        };
        let ready: bool = self.session.is_ready();
        let state: InteractionState = self.session.state();
        let mut clicked: Option<MenuAction> = None;

        egui::Frame::new()
            .fill(bg).stroke(egui::Stroke::new(1.0, border))
            .corner_radius(6.0)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 4, bottom: 4 })
            .show(ui, |ui: &mut egui::Ui| {
                ui.horizontal(|ui: &mut egui::Ui| {
                    let mut tool = |ui: &mut egui::Ui, label: &str, action: MenuAction, active: bool, enabled: bool, hint: &str| {
                        if style::toolbar_button(ui, label, theme, active, enabled).on_hover_text(hint).clicked() {
                            clicked = Some(action);
                        }
                    };
                    tool(ui, "Open", MenuAction::Open, false, !self.is_decoding(), "Ctrl+O");
                    ui.separator();
                    tool(ui, "Crop", MenuAction::Crop, state != InteractionState::Idle, ready, "C");
                    tool(ui, "Filter", MenuAction::Filters, self.panel == Panel::Filters, ready, "Brightness, contrast, saturation...");
                    tool(ui, "Undo", MenuAction::Undo, false, self.session.store().can_undo(), "Ctrl+Z");
                    ui.separator();
                    tool(ui, "Download", MenuAction::Download, false, self.has_image(), "Ctrl+S");
                    tool(ui, "Export", MenuAction::Export, self.panel == Panel::Export, ready, "Save as PNG, JPEG, WebP or BMP");
                    let upload_hint: &str = if self.upload_url.is_some() { "Send to the upload endpoint" } else { "Set an upload URL in Settings" };
                    tool(ui, "Upload", MenuAction::Upload, self.panel == Panel::Upload,
                        ready && self.upload_url.is_some() && !self.is_uploading(), upload_hint);

                    if self.is_decoding() || self.is_uploading() {
                        ui.separator();
                        ui.spinner();
                        ui.label(egui::RichText::new(if self.is_decoding() { "Decoding..." } else { "Uploading..." }).size(12.0));
                    }
                });
            });

        if let Some(action) = clicked {
            if action == MenuAction::Crop && state != InteractionState::Idle { self.cancel_crop(); }
            else if action == MenuAction::Filters && self.panel == Panel::Filters { self.panel = Panel::None; }
            else { self.handle_menu_action(action); }
        }
    }

    pub(super) fn render_options_bar(&mut self, ui: &mut egui::Ui, theme: ThemeMode) {
        let (bg, border, label_col) = if matches!(theme, ThemeMode::Dark) {
            (ColorPalette::ZINC_800, ColorPalette::ZINC_700, ColorPalette::ZINC_400)
        } else {
            (ColorPalette::GRAY_50, ColorPalette::GRAY_300, ColorPalette::ZINC_600)
        };

        egui::Frame::new()
            .fill(bg).stroke(egui::Stroke::new(1.0, border))
            .corner_radius(6.0)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 3, bottom: 3 })
            .show(ui, |ui: &mut egui::Ui| {
                ui.horizontal(|ui: &mut egui::Ui| {
                    ui.set_min_height(26.0);
                    if self.session.crop().is_active() {
                        self.render_crop_options(ui, theme, label_col);
                    } else if let Some(name) = &self.source_name {
                        ui.label(egui::RichText::new(name).size(12.0).color(label_col));
                    } else {
                        ui.label(egui::RichText::new("Open or drop an image to start").size(12.0).color(label_col));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut egui::Ui| {
                        if let Some((w, h)) = self.session.current().and_then(|c| c.dimensions()) {
                            ui.label(egui::RichText::new(format!("{}x{}", w, h)).size(12.0).color(label_col));
                            ui.label(egui::RichText::new(format!("{:.0}%", self.zoom * 100.0)).size(12.0).color(label_col));
                            ui.label(egui::RichText::new("Zoom:").size(12.0).color(label_col));
                        }
                    });
                });
            });
    }

    fn render_crop_options(&mut self, ui: &mut egui::Ui, theme: ThemeMode, label_col: egui::Color32) {
        if self.session.crop().supports_aspect() {
            ui.label(egui::RichText::new("Aspect:").size(12.0).color(label_col));
            for (i, preset) in CROP_PRESETS.iter().enumerate() {
                if style::toolbar_button(ui, preset.label, theme, self.selected_preset == Some(i), true).clicked() {
                    self.selected_preset = Some(i);
                    self.crop_commands.push(CropCommand::Aspect(Some(preset.ratio)));
                }
            }
            if style::toolbar_button(ui, "Free", theme, self.selected_preset.is_none(), true).clicked() {
                self.selected_preset = None;
                self.crop_commands.push(CropCommand::Aspect(None));
            }
            ui.separator();
            ui.label(egui::RichText::new("W:").size(12.0).color(label_col));
            ui.add(egui::DragValue::new(&mut self.custom_w).range(1.0..=16384.0).speed(1.0).suffix("px"));
            ui.label(egui::RichText::new("H:").size(12.0).color(label_col));
            ui.add(egui::DragValue::new(&mut self.custom_h).range(1.0..=16384.0).speed(1.0).suffix("px"));
            if ui.button("Set").clicked() {
                self.selected_preset = None;
                self.crop_commands.push(CropCommand::BoxSize(self.custom_w, self.custom_h));
            }
            ui.separator();
        } else {
            ui.label(egui::RichText::new("Drag over the image to select").size(12.0).color(label_col));
        }

        let pending: Option<CropRect> = self.session.crop().pending();
        if let Some(r) = pending {
            ui.label(egui::RichText::new(format!("{:.0} x {:.0}", r.width, r.height)).size(12.0).color(label_col));
        }
        if style::primary_button(ui, "Apply", pending.is_some()).clicked() { self.apply_crop(); }
        if ui.button("Cancel").clicked() { self.cancel_crop(); }
    }

    pub(super) fn render_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, theme: ThemeMode) {
        if self.panel == Panel::None { self.panel_rect = None; return; }
        let (bg, border, label_col) = if matches!(theme, ThemeMode::Dark) {
            (ColorPalette::ZINC_800, ColorPalette::BLUE_600, ColorPalette::ZINC_400)
        } else {
            (ColorPalette::GRAY_50, ColorPalette::BLUE_600, ColorPalette::ZINC_600)
        };
        let title: &str = match self.panel {
            Panel::Filters => "Adjustments",
            Panel::Export => "Export",
            Panel::Upload => "Upload",
            Panel::None => "",
        };

        let modal_pos: egui::Pos2 = ui.available_rect_before_wrap().min + egui::vec2(10.0, 10.0);
        let win: Option<egui::InnerResponse<Option<()>>> = egui::Window::new(title)
            .collapsible(false).resizable(false)
            .fixed_pos(modal_pos)
            .fixed_size(egui::vec2(320.0, 0.0))
            .frame(egui::Frame::new().fill(bg).stroke(egui::Stroke::new(1.5, border)).corner_radius(8.0).inner_margin(16.0))
            .show(ctx, |ui: &mut egui::Ui| {
                ui.spacing_mut().slider_width = 180.0;
                match self.panel {
                    Panel::Filters => self.filter_controls(ui, theme, label_col),
                    Panel::Export => self.export_controls(ui, theme, label_col),
                    Panel::Upload => self.upload_controls(ui, theme, label_col),
                    Panel::None => {}
                }
            });
        self.panel_rect = win.map(|r| r.response.rect);
    }

    fn filter_controls(&mut self, ui: &mut egui::Ui, theme: ThemeMode, label_col: egui::Color32) {
        for kind in FilterKind::ALL {
            let mut value: f32 = self.session.filters().get(kind);
            ui.horizontal(|ui: &mut egui::Ui| {
                ui.add_sized([78.0, 18.0], egui::Label::new(egui::RichText::new(kind.label()).size(12.0).color(label_col)));
                let slider: egui::Slider<'_> = match kind {
                    FilterKind::Brightness => egui::Slider::new(&mut value, kind.range()).suffix("%").fixed_decimals(0),
                    _ => egui::Slider::new(&mut value, kind.range()).fixed_decimals(2),
                };
                if ui.add(slider).changed() { self.session.filters_mut().set(kind, value); }
            });
        }
        ui.add_space(6.0);
        ui.horizontal(|ui: &mut egui::Ui| {
            let dirty: bool = !self.session.filters().is_identity();
            if style::primary_button(ui, "Apply", dirty).clicked() { self.apply_filter(); }
            if style::secondary_button(ui, "Reset", theme).clicked() { self.session.filters_mut().reset(); }
            if ui.button("Close").clicked() {
                self.session.filters_mut().reset();
                self.panel = Panel::None;
            }
        });
    }

    fn export_controls(&mut self, ui: &mut egui::Ui, theme: ThemeMode, label_col: egui::Color32) {
        ui.label(egui::RichText::new("Format:").size(12.0).color(label_col));
        ui.horizontal_wrapped(|ui: &mut egui::Ui| {
            for format in ExportFormat::ALL {
                if style::toolbar_button(ui, format.as_str(), theme, self.export_format == format, true).clicked() {
                    self.export_format = format;
                }
            }
        });
        if self.export_format == ExportFormat::Jpeg {
            ui.horizontal(|ui: &mut egui::Ui| {
                ui.label(egui::RichText::new("Quality:").size(12.0).color(label_col));
                ui.add(egui::Slider::new(&mut self.export_jpeg_quality, 1..=100).suffix("%"));
            });
        }
        ui.add_space(4.0);
        ui.horizontal(|ui: &mut egui::Ui| {
            if style::primary_button(ui, "Export", true).clicked() {
                if let Err(e) = self.export_to_file() { self.report_failure("Export", e); }
            }
            if ui.button("Cancel").clicked() { self.panel = Panel::None; }
        });
    }

    fn upload_controls(&mut self, ui: &mut egui::Ui, theme: ThemeMode, label_col: egui::Color32) {
        let url: String = self.upload_url.clone().unwrap_or_default();
        ui.label(egui::RichText::new(format!("To {}", url)).size(11.0).color(label_col));
        ui.add_space(4.0);
        egui::Grid::new("upload_fields").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui: &mut egui::Ui| {
            ui.label(egui::RichText::new("Title").size(12.0).color(label_col));
            ui.text_edit_singleline(&mut self.upload_form.title);
            ui.end_row();
            ui.label(egui::RichText::new("Caption").size(12.0).color(label_col));
            ui.text_edit_multiline(&mut self.upload_form.caption);
            ui.end_row();
            ui.label(egui::RichText::new("Folder").size(12.0).color(label_col));
            ui.text_edit_singleline(&mut self.upload_form.folder);
            ui.end_row();
        });
        ui.add_space(6.0);
        ui.horizontal(|ui: &mut egui::Ui| {
            if style::primary_button(ui, "Upload", !self.is_uploading()).clicked() { self.start_upload(); }
            if style::secondary_button(ui, "Cancel", theme).clicked() { self.panel = Panel::None; }
        });
    }

    pub(super) fn render_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let canvas_rect: egui::Rect = ui.available_rect_before_wrap();
        self.canvas_rect = Some(canvas_rect);
        let (rect, response) = ui.allocate_exact_size(canvas_rect.size(), egui::Sense::click_and_drag());
        let painter: egui::Painter = ui.painter_at(rect);

        let checker: f32 = 16.0;
        let (c1, c2) = if ui.visuals().dark_mode {
            (egui::Color32::from_rgb(40, 40, 40), egui::Color32::from_rgb(55, 55, 55))
        } else {
            (egui::Color32::from_rgb(200, 200, 200), egui::Color32::from_rgb(220, 220, 220))
        };
        painter.rect_filled(rect, 0.0, c1);
        let (cols, rows) = ((rect.width() / checker).ceil() as i32, (rect.height() / checker).ceil() as i32);
        for row in 0..rows {
            for col in (row % 2..cols).step_by(2) {
                let min: egui::Pos2 = rect.min + egui::vec2(col as f32 * checker, row as f32 * checker);
                painter.rect_filled(egui::Rect::from_min_size(min, egui::vec2(checker, checker)), 0.0, c2);
            }
        }

        if self.fit_on_next_frame && self.texture.is_some() { self.fit_image(); self.fit_on_next_frame = false; }

        let size: Option<(u32, u32)> = self.session.current().and_then(|c| c.dimensions());
        self.image_rect = match (&self.texture, size) {
            (Some(_), Some((w, h))) => Some(egui::Rect::from_center_size(
                canvas_rect.center() + self.pan,
                egui::vec2(w as f32 * self.zoom, h as f32 * self.zoom),
            )),
            _ => None,
        };
        let surface: Option<SurfaceHandle> = self.image_rect.and_then(|r| self.session.surface(r));
        self.drain_crop_commands(surface.as_ref());

        if let (Some(tex), Some(img_rect)) = (&self.texture, self.image_rect) {
            painter.image(tex.id(), img_rect, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)), egui::Color32::WHITE);
            painter.rect_stroke(img_rect, 0.0, egui::Stroke::new(1.0, ColorPalette::ZINC_500), egui::StrokeKind::Outside);
        } else if self.is_decoding() {
            painter.text(canvas_rect.center(), egui::Align2::CENTER_CENTER, "Decoding image...", egui::FontId::proportional(16.0), ColorPalette::ZINC_400);
        } else if !self.has_image() {
            painter.text(canvas_rect.center(), egui::Align2::CENTER_CENTER, "Drop an image here or press Ctrl+O", egui::FontId::proportional(16.0), ColorPalette::ZINC_400);
        }

        let hover: Option<egui::Pos2> = ui.input(|i: &egui::InputState| i.pointer.latest_pos());
        let over_panel: bool = hover.is_some_and(|p| self.panel_rect.is_some_and(|r| r.contains(p)));

        if let Some(s) = surface {
            if !over_panel { self.feed_pointer(&response, &s); }
            self.draw_crop_overlay(&painter, canvas_rect, &s);
            if response.hovered() && !over_panel {
                ctx.set_cursor_icon(self.session.crop().cursor(Some(&s), hover));
            }
        }

        let scroll: f32 = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 && hover.is_some_and(|p| canvas_rect.contains(p)) && !over_panel {
            self.zoom_by(if scroll > 0.0 { 1.1 } else { 1.0 / 1.1 });
        }
        if response.dragged_by(egui::PointerButton::Middle) { self.pan += response.drag_delta(); }
    }

    /// Translates egui pointer events into crop gestures.
    fn feed_pointer(&mut self, response: &egui::Response, surface: &SurfaceHandle) {
        let pos: Option<egui::Pos2> = response.interact_pointer_pos();
        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin: Option<egui::Pos2> = response.ctx.input(|i| i.pointer.press_origin());
            if let Some(p) = drag_start_point(origin, pos) { self.session.pointer_down(surface, p); }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(p) = pos { self.session.pointer_move(surface, p); }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            let p: Option<egui::Pos2> = pos.or_else(|| response.hover_pos());
            if let Some(p) = p { self.session.pointer_up(surface, p); }
            else { self.session.cancel_crop(); }
        }
    }

    fn draw_crop_overlay(&self, painter: &egui::Painter, canvas_rect: egui::Rect, surface: &SurfaceHandle) {
        let crop = self.session.crop();
        if !crop.is_active() { return; }
        let overlay: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 90);
        let rect: CropRect = match crop.visible_rect() {
            Some(r) => r,
            None => { painter.rect_filled(surface.display, 0.0, overlay); return; }
        };

        let screen: egui::Rect = surface.rect_to_display(&rect);
        dim_outside(painter, canvas_rect, screen, overlay);
        painter.rect_stroke(screen, 0.0, egui::Stroke::new(2.0, ColorPalette::BLUE_400), egui::StrokeKind::Outside);
        if crop.supports_aspect() && crop.state() == InteractionState::CropArmed {
            draw_crop_handles(painter, screen, ColorPalette::BLUE_400);
        }

        let label: String = format!("{:.0} x {:.0}", rect.width, rect.height);
        let raw: egui::Pos2 = egui::pos2(screen.min.x + 4.0, screen.min.y - 18.0);
        let text_pos: egui::Pos2 = egui::pos2(raw.x.max(canvas_rect.min.x + 4.0), raw.y.max(canvas_rect.min.y + 4.0));
        painter.text(text_pos + egui::vec2(1.0, 1.0), egui::Align2::LEFT_TOP, &label, egui::FontId::proportional(12.0), egui::Color32::from_black_alpha(160));
        painter.text(text_pos, egui::Align2::LEFT_TOP, &label, egui::FontId::proportional(12.0), egui::Color32::WHITE);
    }

    pub(super) fn render_toasts(&self, ctx: &egui::Context, theme: ThemeMode) {
        let canvas: egui::Rect = match self.canvas_rect { Some(c) => c, None => return };
        if self.toasts.is_empty() { return; }
        egui::Area::new(egui::Id::new("crop_editor_toasts"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(canvas.center().x - 160.0, canvas.max.y - 16.0 - 40.0 * self.toasts.len() as f32))
            .interactable(false)
            .show(ctx, |ui: &mut egui::Ui| {
                for toast in &self.toasts {
                    let (fill, text) = match (toast.kind, theme) {
                        (ToastKind::Error, _) => (ColorPalette::RED_600, egui::Color32::WHITE),
                        (ToastKind::Info, ThemeMode::Dark) => (ColorPalette::ZINC_700, ColorPalette::ZINC_100),
                        (ToastKind::Info, ThemeMode::Light) => (ColorPalette::GRAY_800, egui::Color32::WHITE),
                    };
                    egui::Frame::new().fill(fill).corner_radius(6.0).inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui: &mut egui::Ui| {
                            ui.set_width(296.0);
                            ui.label(egui::RichText::new(&toast.text).size(13.0).color(text));
                        });
                    ui.add_space(4.0);
                }
            });
    }
}
