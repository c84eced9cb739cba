use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use manor_core::collection::{self, Collection};

pub mod app_loop;
pub mod audio;
pub mod frame_input;
pub mod hud;
pub mod render;
pub mod seed;
pub mod window_config;

pub const APP_NAME: &str = "Haunted Manor";

/// Read and validate a collection file (native or Postman v2.1).
pub fn load_collection(path: &Path) -> Result<Collection> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read collection file: {}", path.display()))?;
    collection::parse_collection(&raw)
        .with_context(|| format!("failed to parse collection file: {}", path.display()))
}
