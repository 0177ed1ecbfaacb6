use eframe::egui;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::modules::image_editor::CropMode;
use crate::style::ThemeMode;

pub const DEFAULT_DOWNLOAD_NAME: &str = "image.png";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn resolve(&self, system: egui::Theme) -> ThemeMode {
        match self {
            ThemePreference::System => match system {
                egui::Theme::Dark => ThemeMode::Dark,
                egui::Theme::Light => ThemeMode::Light,
            },
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub theme_preference: ThemePreference,
    pub crop_mode: CropMode,
    pub download_file_name: String,
    pub upload_url: Option<String>,
    pub default_aspect_ratio: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_preference: ThemePreference::System,
            crop_mode: CropMode::Manual,
            download_file_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            upload_url: None,
            default_aspect_ratio: 1.0,
        }
    }
}

impl AppSettings {
    pub fn config_path() -> PathBuf {
        let mut path: PathBuf = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("crop_editor");
        path.push("settings.json");
        path
    }

    /// Settings from the user config dir. Anything unreadable falls back to
    /// the defaults.
    pub fn load() -> Self {
        let path: PathBuf = Self::config_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                if path.exists() { tracing::warn!(error = %e, path = %path.display(), "ignoring unreadable settings"); }
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents: String = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<AppSettings>(&contents)?.sanitized())
    }

    pub fn save(&self) -> Result<()> { self.save_to(&Self::config_path()) }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() { fs::create_dir_all(parent)?; }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Aspect ratio handed to the crop box, `None` meaning free-form.
    pub fn aspect_ratio(&self) -> Option<f32> {
        Some(self.default_aspect_ratio).filter(|r| r.is_finite() && *r > 0.0)
    }

    fn sanitized(mut self) -> Self {
        if self.download_file_name.trim().is_empty() { self.download_file_name = DEFAULT_DOWNLOAD_NAME.to_string(); }
        if self.upload_url.as_deref().is_some_and(|u| u.trim().is_empty()) { self.upload_url = None; }
        self
    }
}
