use eframe::egui;

use crate::config::{AppSettings, ThemePreference};
use crate::modules::image_editor::{CropMode, ImageEditor, ImageSource};
use crate::modules::{EditorModule, MenuAction, MenuItem};
use crate::style::{self, ColorPalette, ThemeMode};

pub const APP_NAME: &str = "Crop Editor";

pub struct CropEditorApp {
    editor: ImageEditor,
    settings: AppSettings,
    theme_mode: ThemeMode,
    show_settings: bool,
    upload_url_input: String,
    last_title: String,
}

impl CropEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, initial: Option<ImageSource>) -> Self {
        let theme_mode: ThemeMode = settings.theme_preference.resolve(cc.egui_ctx.theme());
        style::apply_theme(&cc.egui_ctx, theme_mode);

        let mut editor: ImageEditor = ImageEditor::new(&settings);
        if let Some(source) = initial { editor.open(source); }

        Self {
            upload_url_input: settings.upload_url.clone().unwrap_or_default(),
            editor,
            settings,
            theme_mode,
            show_settings: false,
            last_title: String::new(),
        }
    }

    fn save_settings(&mut self) {
        self.editor.apply_settings(&self.settings);
        if let Err(e) = self.settings.save() {
            tracing::warn!(error = %e, "could not save settings");
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, pref: ThemePreference) {
        self.settings.theme_preference = pref;
        self.theme_mode = pref.resolve(ctx.theme());
        style::apply_theme(ctx, self.theme_mode);
        self.save_settings();
    }

    fn menu_entries(&mut self, ui: &mut egui::Ui, items: &[(MenuItem, MenuAction)]) {
        for (item, action) in items {
            if item.is_separator() { ui.separator(); continue; }
            if ui.add_enabled(item.enabled, egui::Button::new(item.display_label())).clicked() {
                self.editor.handle_menu_action(action.clone());
                ui.close();
            }
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        let contributions = self.editor.get_menu_contributions();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    self.menu_entries(ui, &contributions.file_items);
                    ui.separator();
                    if ui.button("Settings...").clicked() {
                        self.show_settings = true;
                        ui.close();
                    }
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });

                ui.menu_button("Edit", |ui| {
                    self.menu_entries(ui, &contributions.edit_items);
                });

                ui.menu_button("View", |ui| {
                    self.menu_entries(ui, &contributions.view_items);
                    ui.separator();
                    ui.label("Theme:");
                    for (pref, label) in [
                        (ThemePreference::System, "System"),
                        (ThemePreference::Light, "Light"),
                        (ThemePreference::Dark, "Dark"),
                    ] {
                        if ui.selectable_label(self.settings.theme_preference == pref, label).clicked() {
                            self.set_theme(ctx, pref);
                            ui.close();
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings { return; }
        let (bg, border, muted, text) = if matches!(self.theme_mode, ThemeMode::Dark) {
            (egui::Color32::from_rgb(22, 22, 27), ColorPalette::ZINC_700, ColorPalette::ZINC_500, ColorPalette::SLATE_200)
        } else {
            (egui::Color32::WHITE, ColorPalette::GRAY_200, ColorPalette::GRAY_400, ColorPalette::GRAY_700)
        };

        let mut open: bool = self.show_settings;
        let mut changed: bool = false;
        let mut theme_clicked: Option<ThemePreference> = None;

        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .min_width(400.0)
            .frame(egui::Frame::new().fill(bg).stroke(egui::Stroke::new(1.0, border)).corner_radius(10.0).inner_margin(28.0))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("APPEARANCE").size(11.0).color(muted));
                ui.add_space(10.0);
                settings_row(ui, "Theme", text, |ui| {
                    for (pref, label) in [(ThemePreference::Dark, "Dark"), (ThemePreference::Light, "Light"), (ThemePreference::System, "System")] {
                        if ui.selectable_label(self.settings.theme_preference == pref, label).clicked() { theme_clicked = Some(pref); }
                    }
                });

                ui.add_space(10.0);
                ui.label(egui::RichText::new("CROPPING").size(11.0).color(muted));
                ui.add_space(10.0);
                settings_row(ui, "Crop style", text, |ui| {
                    egui::ComboBox::from_id_salt("crop_mode_pick")
                        .selected_text(self.settings.crop_mode.label())
                        .show_ui(ui, |ui| {
                            for mode in [CropMode::Manual, CropMode::Widget] {
                                changed |= ui.selectable_value(&mut self.settings.crop_mode, mode, mode.label()).changed();
                            }
                        });
                });
                settings_row(ui, "Default aspect (0 = free)", text, |ui| {
                    let drag = ui.add(egui::DragValue::new(&mut self.settings.default_aspect_ratio).range(0.0..=10.0).speed(0.01).fixed_decimals(2));
                    if drag.drag_stopped() || drag.lost_focus() { changed = true; }
                });

                ui.add_space(10.0);
                ui.label(egui::RichText::new("OUTPUT").size(11.0).color(muted));
                ui.add_space(10.0);
                settings_row(ui, "Download name", text, |ui| {
                    let edit = ui.add(egui::TextEdit::singleline(&mut self.settings.download_file_name).desired_width(180.0));
                    if edit.lost_focus() && !self.settings.download_file_name.trim().is_empty() { changed = true; }
                });
                settings_row(ui, "Upload URL", text, |ui| {
                    let edit = ui.add(egui::TextEdit::singleline(&mut self.upload_url_input).hint_text("https://...").desired_width(180.0));
                    if edit.lost_focus() {
                        let trimmed: &str = self.upload_url_input.trim();
                        self.settings.upload_url = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
                        changed = true;
                    }
                });
            });

        self.show_settings = open;
        if let Some(pref) = theme_clicked { self.set_theme(ctx, pref); }
        if changed { self.save_settings(); }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<egui::DroppedFile> = ctx.input(|i| i.raw.dropped_files.clone());
        let file: egui::DroppedFile = match dropped.into_iter().next() { Some(f) => f, None => return };
        let source: Option<ImageSource> = match (file.path, file.bytes) {
            (Some(path), _) => Some(ImageSource::Path(path)),
            (None, Some(bytes)) => Some(ImageSource::Bytes { bytes: bytes.to_vec(), name: file.name }),
            (None, None) => None,
        };
        if let Some(source) = source { self.editor.open(source); }
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        let title: String = format!("{} - {}", self.editor.get_title(), APP_NAME);
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }
}

fn settings_row(ui: &mut egui::Ui, label: &str, color: egui::Color32, add: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).size(14.0).color(color));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), add);
    });
    ui.add_space(6.0);
}

impl eframe::App for CropEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if matches!(self.settings.theme_preference, ThemePreference::System) {
            let system_theme: ThemeMode = ThemePreference::System.resolve(ctx.theme());
            if self.theme_mode != system_theme {
                self.theme_mode = system_theme;
                style::apply_theme(ctx, self.theme_mode);
            }
        }

        self.handle_dropped_files(ctx);
        self.render_settings_modal(ctx);
        self.top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.editor.ui(ui, ctx);
        });

        self.sync_window_title(ctx);
    }
}
