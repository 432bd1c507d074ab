use crate::error::ReportError;
use crate::render::Renderer;
use crate::report::Artifact;
use std::path::PathBuf;

/// Keeps artifacts in memory instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub rendered: Vec<Artifact>,
}

impl RecordingRenderer {
    pub fn names(&self) -> Vec<String> {
        self.rendered.iter().map(Artifact::file_name).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, artifact: &Artifact) -> Result<PathBuf, ReportError> {
        self.rendered.push(artifact.clone());
        Ok(PathBuf::from(artifact.file_name()))
    }
}
