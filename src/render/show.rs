//! Interactive output: draw to a scratch PNG, then hand it to a viewer.

use crate::error::ReportError;
use crate::render::png::draw_png;
use crate::render::{RenderConfig, Renderer};
use crate::report::Artifact;

use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Opener for `os` (as in `std::env::consts::OS`) when no viewer is
/// configured: program plus the arguments that precede the image path.
///
/// Windows goes through `cmd /C start ""`: `start` returns 0 once the file
/// is handed off, where `explorer` exits 1 even on success.
pub fn platform_viewer(os: &str) -> (&'static str, &'static [&'static str]) {
    const NO_ARGS: &[&str] = &[];
    const START: &[&str] = &["/C", "start", ""];
    match os {
        "macos" => ("open", NO_ARGS),
        "windows" => ("cmd", START),
        _ => ("xdg-open", NO_ARGS),
    }
}

#[derive(Debug, Clone)]
pub struct ShowRenderer {
    program: String,
    args: Vec<String>,
    scratch: PathBuf,
    config: RenderConfig,
}

impl ShowRenderer {
    /// `viewer` is a command line; the image path is appended as the last
    /// argument.
    pub fn new(viewer: &str, config: RenderConfig) -> Result<Self, ReportError> {
        let mut words = viewer.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| ReportError::render("viewer", "empty viewer command"))?;
        Ok(Self {
            program,
            args: words.collect(),
            scratch: std::env::temp_dir().join("jfr-report"),
            config,
        })
    }

    /// Viewer for the running platform.
    pub fn platform_default(config: RenderConfig) -> Self {
        let (program, args) = platform_viewer(std::env::consts::OS);
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            scratch: std::env::temp_dir().join("jfr-report"),
            config,
        }
    }
}

impl Renderer for ShowRenderer {
    fn render(&mut self, artifact: &Artifact) -> Result<PathBuf, ReportError> {
        let name = artifact.file_name();
        std::fs::create_dir_all(&self.scratch).map_err(|e| ReportError::render(&name, e))?;
        let path = self.scratch.join(&name);
        draw_png(&path, self.config, artifact)?;

        info!("showing {} with {}", path.display(), self.program);
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .status()
            .map_err(|e| {
                ReportError::render(&name, format!("cannot run {}: {}", self.program, e))
            })?;
        if !status.success() {
            return Err(ReportError::render(
                &name,
                format!("viewer {} exited with {}", self.program, status),
            ));
        }
        Ok(path)
    }
}
