use eframe::egui;

use crate::config::AppSettings;
use crate::error::Result;

pub mod helpers;
pub mod image_editor;

#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    Open,
    Download,
    Export,
    Upload,
    CopyDataUrl,
    Undo,
    Crop,
    ApplyCrop,
    CancelCrop,
    Filters,
    ZoomIn,
    ZoomOut,
    Fit,
    None,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub shortcut: Option<String>,
    pub enabled: bool,
}

impl MenuItem {
    pub fn new(label: &str, shortcut: Option<&str>, enabled: bool) -> Self {
        Self { label: label.to_string(), shortcut: shortcut.map(str::to_string), enabled }
    }

    pub fn separator() -> Self { Self { label: "Separator".to_string(), shortcut: None, enabled: false } }

    pub fn is_separator(&self) -> bool { self.label == "Separator" }

    pub fn display_label(&self) -> String {
        match &self.shortcut {
            Some(shortcut) => format!("{} ({})", self.label, shortcut),
            None => self.label.clone(),
        }
    }
}

/// Entries a module adds to the shell's top menus.
#[derive(Debug, Clone, Default)]
pub struct MenuContribution {
    pub file_items: Vec<(MenuItem, MenuAction)>,
    pub edit_items: Vec<(MenuItem, MenuAction)>,
    pub view_items: Vec<(MenuItem, MenuAction)>,
}

pub trait EditorModule {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context);
    fn save(&mut self) -> Result<()>;
    fn get_title(&self) -> String;
    fn get_menu_contributions(&self) -> MenuContribution { MenuContribution::default() }
    fn handle_menu_action(&mut self, _action: MenuAction) -> bool { false }
    /// Settings changed in the shell; modules pick up what concerns them.
    fn apply_settings(&mut self, _settings: &AppSettings) {}
}
