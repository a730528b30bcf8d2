//! Series and point model plus data-source ingestion.
//!
//! A data source is an ordered sequence of key-value records; two field
//! selectors pick the x and y values out of each record. Query execution and
//! async fetching stay outside the core.

use serde_json::{Map, Value};
use tracing::debug;

use crate::axis::Axis;
use crate::coords::value_to_pixel;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Point, Rect};
use crate::render::Color;

/// One data point with its stable selection identity.
///
/// `value` is `None` for malformed source records; such points stay in the
/// sequence (index identity must remain stable) but never project to a pixel
/// location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub value: Option<Point>,
    pub location: Option<Point>,
    pub visible: bool,
    pub series_index: usize,
    pub point_index: usize,
}

impl SeriesPoint {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Color,
    pub visible: bool,
    pub series_index: usize,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Builds a series from ordered key-value records and two field selectors.
    ///
    /// Records with a missing or non-numeric field become empty points rather
    /// than failing the whole series.
    pub fn ingest(
        records: &[Map<String, Value>],
        x_field: &str,
        y_field: &str,
        series_index: usize,
        name: impl Into<String>,
        color: Color,
    ) -> Self {
        let mut empty_count = 0usize;
        let points = records
            .iter()
            .enumerate()
            .map(|(point_index, record)| {
                let x = record.get(x_field).and_then(Value::as_f64);
                let y = record.get(y_field).and_then(Value::as_f64);
                let value = match (x, y) {
                    (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                        Some(Point::new(x, y))
                    }
                    _ => {
                        empty_count += 1;
                        None
                    }
                };
                SeriesPoint {
                    value,
                    location: None,
                    visible: true,
                    series_index,
                    point_index,
                }
            })
            .collect();

        if empty_count > 0 {
            debug!(series_index, empty_count, "skipped malformed records");
        }

        Self {
            name: name.into(),
            color,
            visible: true,
            series_index,
            points,
        }
    }

    /// Builds a series directly from raw (x, y) pairs.
    pub fn from_values(
        values: &[(f64, f64)],
        series_index: usize,
        name: impl Into<String>,
        color: Color,
    ) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(point_index, &(x, y))| SeriesPoint {
                value: (x.is_finite() && y.is_finite()).then(|| Point::new(x, y)),
                location: None,
                visible: true,
                series_index,
                point_index,
            })
            .collect();

        Self {
            name: name.into(),
            color,
            visible: true,
            series_index,
            points,
        }
    }

    /// All finite values along one dimension, for axis range computation.
    #[must_use]
    pub fn axis_values(&self, dimension: Dimension) -> Vec<f64> {
        self.points
            .iter()
            .filter_map(|point| point.value)
            .map(|value| match dimension {
                Dimension::X => value.x,
                Dimension::Y => value.y,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    X,
    Y,
}

/// Computes pixel locations for every non-empty point of a series.
///
/// Logarithmic domain failures mark the offending point empty instead of
/// aborting the series; all other mapping errors propagate.
pub fn project_series(
    series: &mut Series,
    x_axis: &Axis,
    y_axis: &Axis,
    plot: Rect,
) -> ChartResult<()> {
    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;
        series
            .points
            .par_iter_mut()
            .try_for_each(|point| project_point(point, x_axis, y_axis, plot))
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        series
            .points
            .iter_mut()
            .try_for_each(|point| project_point(point, x_axis, y_axis, plot))
    }
}

fn project_point(
    point: &mut SeriesPoint,
    x_axis: &Axis,
    y_axis: &Axis,
    plot: Rect,
) -> ChartResult<()> {
    let Some(value) = point.value else {
        point.location = None;
        return Ok(());
    };

    let x = value_to_pixel(value.x, x_axis, plot);
    let y = value_to_pixel(value.y, y_axis, plot);
    match (x, y) {
        (Ok(x), Ok(y)) => {
            point.location = Some(Point::new(x, y));
            Ok(())
        }
        (Err(ChartError::Domain { .. }), _) | (_, Err(ChartError::Domain { .. })) => {
            point.value = None;
            point.location = None;
            Ok(())
        }
        (Err(error), _) | (_, Err(error)) => Err(error),
    }
}
