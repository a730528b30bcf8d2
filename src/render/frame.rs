use crate::error::{ChartError, ChartResult};
use crate::geometry::Rect;
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};
use crate::selection::ElementId;

/// Backend-agnostic scene for one chart measuring pass.
///
/// `legend_clip` bounds the legend primitives only: legend overflow degrades
/// by clipping against it rather than failing layout. The rest of the scene
/// is never clipped to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Rect,
    pub legend_clip: Option<Rect>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            legend_clip: None,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_legend_clip(mut self, clip: Rect) -> Self {
        self.legend_clip = Some(clip);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    /// Every element identity carried by any primitive, in draw order.
    #[must_use]
    pub fn element_ids(&self) -> Vec<ElementId> {
        let rects = self.rects.iter().filter_map(|rect| rect.element);
        let lines = self.lines.iter().filter_map(|line| line.element);
        let texts = self.texts.iter().filter_map(|text| text.element);
        rects.chain(lines).chain(texts).collect()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() || self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}
