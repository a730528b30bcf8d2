use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Renderer that validates frames and draws nothing.
///
/// Useful for headless tests and for hosts that only consume geometry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer {
    frames_rendered: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames_rendered(self) -> usize {
        self.frames_rendered
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        Ok(())
    }
}
