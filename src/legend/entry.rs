use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::render::Color;
use crate::series::Series;
use crate::text::TextSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendShape {
    #[default]
    Rectangle,
    Circle,
    Line,
}

/// One shape + label pair in the legend.
///
/// A pure projection of a visible series or point: it holds no ownership over
/// the series, only the `(series_index, point_index)` back-reference.
/// `text_size` and `location` are filled in by the layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub text: String,
    pub fill: Color,
    pub shape: LegendShape,
    pub visible: bool,
    pub series_index: usize,
    pub point_index: Option<usize>,
    pub text_size: TextSize,
    pub location: Point,
}

impl LegendEntry {
    #[must_use]
    pub fn new(text: impl Into<String>, fill: Color, series_index: usize) -> Self {
        Self {
            text: text.into(),
            fill,
            shape: LegendShape::Rectangle,
            visible: true,
            series_index,
            point_index: None,
            text_size: TextSize::default(),
            location: Point::new(0.0, 0.0),
        }
    }

    #[must_use]
    pub fn with_shape(mut self, shape: LegendShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn with_point_index(mut self, point_index: usize) -> Self {
        self.point_index = Some(point_index);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Derives legend entries 1:1 from the visible series of a chart.
#[must_use]
pub fn entries_for_series(series: &[Series]) -> Vec<LegendEntry> {
    series
        .iter()
        .filter(|series| series.visible)
        .map(|series| LegendEntry::new(series.name.clone(), series.color, series.series_index))
        .collect()
}
