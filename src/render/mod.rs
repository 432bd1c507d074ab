//! Rendering: the seam between planned charts and a charting backend.

pub mod png;
pub mod show;
#[cfg(test)]
pub mod testing;

pub use png::SaveRenderer;
pub use show::ShowRenderer;

use crate::error::ReportError;
use crate::report::Artifact;
use std::path::PathBuf;

/// Draws one artifact and reports where the image ended up.
pub trait Renderer {
    fn render(&mut self, artifact: &Artifact) -> Result<PathBuf, ReportError>;
}

/// Raster size shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}
