use crate::error::NumlabResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer: validates frames and records what it would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_marker_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> NumlabResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_marker_count = frame.markers.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
