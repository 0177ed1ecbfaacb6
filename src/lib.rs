pub mod app;
pub mod config;
pub mod error;
pub mod modules;
pub mod style;

pub use config::AppSettings;
pub use error::{EditorError, Result};
