mod ie_helpers;
mod ie_main;
mod ie_tools;
mod ie_ui;

pub mod ie_crop;
pub mod ie_filters;
pub mod ie_history;
pub mod ie_image;
pub mod ie_store;

pub use ie_crop::{
    extract_region, AspectPreset, CropHandle, CropHandler, CropMode, CropRect, CropStrategy,
    InteractionState, ManualCrop, PixelRegion, SurfaceHandle, WidgetCrop, CROP_PRESETS,
};
pub use ie_filters::{FilterKind, FilterParams};
pub use ie_history::HistoryStack;
pub use ie_image::ImageRef;
pub use ie_main::{ImageEditor, ImageSource};
pub use ie_store::{EditSession, ImageStore};
