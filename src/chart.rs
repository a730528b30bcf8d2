//! Chart session: explicit configuration plus the single-threaded measuring
//! pass that turns raw series into a published chart model.
//!
//! Configuration is plain structs with named optional fields; there is no
//! framework context or reflection-based merging. A measuring pass builds a
//! complete candidate model and publishes it atomically; a superseded pass is
//! simply dropped by running the next one.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{Axis, AxisKind, Orientation, RangeOptions};
use crate::coords::value_to_pixel;
use crate::error::{ChartError, ChartResult};
use crate::geometry::Rect;
use crate::legend::{LegendConfig, LegendLayout, entries_for_series, layout_legend};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};
use crate::selection::{ElementId, SelectionConfig, SelectionState, VisualDiff};
use crate::series::{Dimension, Series, project_series};
use crate::text::{Font, TextMeasurer};

/// Side length of the square marker drawn at each projected point.
const MARKER_SIZE: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub kind: AxisKind,
    pub range: RangeOptions,
    pub zoom_factor: f64,
    pub zoom_position: f64,
    pub inverted: bool,
    pub log_base: f64,
    /// Ordered category labels, used only by `AxisKind::Category`.
    pub categories: Vec<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            kind: AxisKind::Double,
            range: RangeOptions::default(),
            zoom_factor: 1.0,
            zoom_position: 0.0,
            inverted: false,
            log_base: 10.0,
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Rect,
    /// Uniform padding between the viewport and the plotting rectangle.
    pub plot_padding: f64,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub legend: Option<LegendConfig>,
    /// Region the legend lays out into; defaults to the full viewport.
    pub legend_area: Option<Rect>,
    pub selection: SelectionConfig,
    pub label_font: Font,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            plot_padding: 10.0,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            legend: None,
            legend_area: None,
            selection: SelectionConfig::default(),
            label_font: Font::default(),
        }
    }

    fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        if !self.plot_padding.is_finite() || self.plot_padding < 0.0 {
            return Err(ChartError::InvalidConfig(
                "plot padding must be finite and >= 0".to_owned(),
            ));
        }
        self.x_axis.range.validate()?;
        self.y_axis.range.validate()?;
        Ok(())
    }
}

/// State finalized by one measuring pass.
///
/// Everything here is rebuilt wholesale on the next pass; only the selection
/// state outside it persists.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub plot: Rect,
    pub series: Vec<Series>,
    pub legend: Option<LegendLayout>,
    pub frame: RenderFrame,
}

pub struct ChartSession {
    config: ChartConfig,
    selection: SelectionState,
    model: Option<ChartModel>,
}

impl ChartSession {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let selection = SelectionState::new(config.selection.clone());
        Ok(Self {
            config,
            selection,
            model: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> Option<&ChartModel> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Runs the measuring pass over a series collection and publishes the
    /// resulting model. Selection state survives the rebuild.
    pub fn measure(
        &mut self,
        series: Vec<Series>,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<&ChartModel> {
        let model = self.build_model(series, measurer)?;
        Ok(self.model.insert(model))
    }

    /// Applies one abstracted click against the current frame's elements.
    pub fn handle_click(&mut self, target: ElementId) -> ChartResult<VisualDiff> {
        let model = self.model.as_ref().ok_or_else(|| {
            ChartError::InvalidConfig("measuring pass has not run yet".to_owned())
        })?;
        Ok(self.selection.handle_click(target, &model.frame.element_ids()))
    }

    fn build_model(
        &self,
        mut series: Vec<Series>,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<ChartModel> {
        let viewport = self.config.viewport;
        let plot = viewport.deflate(self.config.plot_padding).validate()?;

        let x_axis = build_axis(&self.config.x_axis, Orientation::Horizontal, &series, Dimension::X)?;
        let y_axis = build_axis(&self.config.y_axis, Orientation::Vertical, &series, Dimension::Y)?;

        for one in series.iter_mut() {
            project_series(one, &x_axis, &y_axis, plot)?;
        }

        let legend = match &self.config.legend {
            Some(config) => {
                let area = self.config.legend_area.unwrap_or(viewport);
                let entries = entries_for_series(&series);
                Some(layout_legend(&entries, area, config, measurer)?)
            }
            None => None,
        };

        let frame = build_frame(viewport, plot, &x_axis, &y_axis, &series, legend.as_ref(), &self.config)?;
        frame.validate()?;

        debug!(
            series = series.len(),
            legend = legend.is_some(),
            "measuring pass complete"
        );

        Ok(ChartModel {
            x_axis,
            y_axis,
            plot,
            series,
            legend,
            frame,
        })
    }
}

fn build_axis(
    config: &AxisConfig,
    orientation: Orientation,
    series: &[Series],
    dimension: Dimension,
) -> ChartResult<Axis> {
    let values: Vec<f64> = series
        .iter()
        .flat_map(|one| one.axis_values(dimension))
        .collect();

    let mut axis = match config.kind {
        AxisKind::Double => Axis::numeric(orientation, &values, config.range),
        AxisKind::Logarithmic => {
            Axis::logarithmic(orientation, &values, config.range, config.log_base)
        }
        AxisKind::Category => Axis::category(orientation, config.categories.clone()),
        AxisKind::DateTime => {
            let times: Vec<DateTime<Utc>> = values
                .iter()
                .filter_map(|&seconds| {
                    let millis = (seconds * 1000.0).round() as i64;
                    match Utc.timestamp_millis_opt(millis) {
                        chrono::LocalResult::Single(time) => Some(time),
                        _ => None,
                    }
                })
                .collect();
            Axis::date_time(orientation, &times, config.range)
        }
    }?;

    axis.set_inverted(config.inverted);
    if config.zoom_factor != 1.0 || config.zoom_position != 0.0 {
        axis.set_zoom(config.zoom_factor, config.zoom_position)?;
    }
    Ok(axis)
}

fn build_frame(
    viewport: Rect,
    plot: Rect,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &[Series],
    legend: Option<&LegendLayout>,
    config: &ChartConfig,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(viewport);

    frame.rects.push(
        RectPrimitive::new(viewport, Color::rgba(1.0, 1.0, 1.0, 1.0), 0.0)
            .with_element(ElementId::background()),
    );

    push_axis_labels(&mut frame, x_axis, plot, config)?;
    push_axis_labels(&mut frame, y_axis, plot, config)?;

    for one in series {
        if !one.visible {
            continue;
        }
        push_series(&mut frame, one);
    }

    if let Some(layout) = legend {
        push_legend(&mut frame, layout, config);
        frame.legend_clip = Some(layout.bounds);
    }

    Ok(frame)
}

fn push_axis_labels(
    frame: &mut RenderFrame,
    axis: &Axis,
    plot: Rect,
    config: &ChartConfig,
) -> ChartResult<()> {
    let font = config.label_font.clone();
    let color = Color::rgb(0.2, 0.2, 0.2);

    let label_values: Vec<(String, f64)> = if axis.kind() == AxisKind::Category {
        axis.labels()
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index as f64))
            .collect()
    } else {
        axis.labels()
            .iter()
            .cloned()
            .zip(axis.range().tick_values())
            .filter(|&(_, value)| axis.visible_range().contains(value))
            .collect()
    };

    for (label, value) in label_values {
        if label.is_empty() {
            continue;
        }
        // Log-axis ticks are stored as exponents; mapping takes data values.
        let data_value = match axis.kind() {
            AxisKind::Logarithmic => axis.log_base().powf(value),
            _ => value,
        };
        let pixel = value_to_pixel(data_value, axis, plot)?;
        let (x, y, align) = match axis.orientation() {
            Orientation::Horizontal => (pixel, plot.bottom() + font.size, TextHAlign::Center),
            Orientation::Vertical => (plot.x - 4.0, pixel, TextHAlign::Right),
        };
        frame
            .texts
            .push(TextPrimitive::new(label, x, y, font.clone(), color, align));
    }
    Ok(())
}

fn push_series(frame: &mut RenderFrame, series: &Series) {
    let mut previous: Option<crate::geometry::Point> = None;

    for point in &series.points {
        let Some(location) = point.location else {
            previous = None;
            continue;
        };
        if !point.visible {
            previous = None;
            continue;
        }

        if let Some(from) = previous {
            frame.lines.push(
                LinePrimitive::new(from.x, from.y, location.x, location.y, 1.0, series.color)
                    .with_element(ElementId::series_segment(
                        point.series_index,
                        point.point_index,
                    )),
            );
        }

        let marker = Rect::new(
            location.x - MARKER_SIZE / 2.0,
            location.y - MARKER_SIZE / 2.0,
            MARKER_SIZE,
            MARKER_SIZE,
        );
        frame.rects.push(
            RectPrimitive::new(marker, series.color, 1.0)
                .with_element(ElementId::marker(point.series_index, point.point_index)),
        );

        previous = Some(location);
    }
}

fn push_legend(frame: &mut RenderFrame, layout: &LegendLayout, config: &ChartConfig) {
    let Some(legend_config) = config.legend.as_ref() else {
        return;
    };
    let text_color = Color::rgb(0.1, 0.1, 0.1);

    if !layout.title_lines.is_empty() {
        let line_height = layout.title_height / layout.title_lines.len() as f64;
        for (index, line) in layout.title_lines.iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                line.clone(),
                layout.bounds.x,
                layout.bounds.y + (index as f64 + 1.0) * line_height,
                legend_config.title_font.clone(),
                text_color,
                TextHAlign::Left,
            ));
        }
    }

    for placed in layout.visible_entries() {
        let entry = &placed.entry;
        let shape = Rect::new(
            entry.location.x + legend_config.item_padding,
            entry.location.y,
            legend_config.shape_size.width,
            legend_config.shape_size.height,
        );
        frame.rects.push(
            RectPrimitive::new(shape, entry.fill, 1.0)
                .with_element(ElementId::legend_item(entry.series_index)),
        );
        if !entry.text.is_empty() {
            frame.texts.push(
                TextPrimitive::new(
                    entry.text.clone(),
                    shape.right() + legend_config.item_padding,
                    entry.location.y + entry.text_size.height,
                    legend_config.font.clone(),
                    text_color,
                    TextHAlign::Left,
                )
                .with_element(ElementId::legend_item(entry.series_index)),
            );
        }
    }

    if layout.shows_navigation(legend_config) {
        let nav = Rect::new(
            layout.bounds.right() - legend_config.nav_reservation,
            layout.bounds.bottom() - legend_config.nav_reservation,
            legend_config.nav_reservation,
            legend_config.nav_reservation,
        );
        frame.rects.push(
            RectPrimitive::new(nav, Color::rgb(0.85, 0.85, 0.85), 1.0)
                .with_element(ElementId::nav_control()),
        );
    }
}
