//! Value-to-pixel coordinate mapping.
//!
//! Pure functions over an [`Axis`] and a plotting rectangle; callable
//! concurrently since they only read.

use crate::axis::{Axis, AxisKind, Orientation};
use crate::error::{ChartError, ChartResult};
use crate::geometry::Rect;

/// Maps a data value to a pixel coordinate along the axis orientation.
///
/// Linear axes interpolate over the visible range; logarithmic axes transform
/// into exponent space first and fail with [`ChartError::Domain`] for values
/// `<= 0`; category axes treat the value as an integer slot index placed at
/// slot center. Vertical axes map screen-up by default (larger values higher),
/// composed with the axis `inverted` flag.
pub fn value_to_pixel(value: f64, axis: &Axis, plot: Rect) -> ChartResult<f64> {
    let (start, length) = plot_span(axis, plot)?;

    if axis.kind() == AxisKind::Category {
        let index = category_index(value, axis.category_count())?;
        let slot = length / axis.category_count() as f64;
        let offset = (index as f64 + 0.5) * slot;
        return Ok(apply_mirror(start, length, offset, mirrored(axis)));
    }

    let fraction = value_fraction(value, axis)?;
    Ok(apply_mirror(start, length, fraction * length, mirrored(axis)))
}

/// Inverse of [`value_to_pixel`].
///
/// For category axes the result is the slot index nearest to the pixel,
/// returned as `f64`.
pub fn pixel_to_value(pixel: f64, axis: &Axis, plot: Rect) -> ChartResult<f64> {
    if !pixel.is_finite() {
        return Err(ChartError::InvalidConfig("pixel must be finite".to_owned()));
    }
    let (start, length) = plot_span(axis, plot)?;
    let offset = if mirrored(axis) {
        start + length - pixel
    } else {
        pixel - start
    };

    if axis.kind() == AxisKind::Category {
        let slot = length / axis.category_count() as f64;
        return Ok((offset / slot - 0.5).round());
    }

    let visible = axis.visible_range();
    if visible.delta() <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "visible range is degenerate".to_owned(),
        ));
    }

    let transformed = visible.minimum() + offset / length * visible.delta();
    match axis.kind() {
        AxisKind::Logarithmic => Ok(axis.log_base().powf(transformed)),
        _ => Ok(transformed),
    }
}

fn plot_span(axis: &Axis, plot: Rect) -> ChartResult<(f64, f64)> {
    let plot = plot.validate()?;
    Ok(match axis.orientation() {
        Orientation::Horizontal => (plot.x, plot.width),
        Orientation::Vertical => (plot.y, plot.height),
    })
}

/// Whether pixel output runs opposite to value order.
///
/// Vertical axes are screen-inverted by default; the explicit `inverted` flag
/// flips whichever direction the orientation implies.
fn mirrored(axis: &Axis) -> bool {
    let vertical = axis.orientation() == Orientation::Vertical;
    vertical != axis.is_inverted()
}

fn apply_mirror(start: f64, length: f64, offset: f64, mirrored: bool) -> f64 {
    if mirrored {
        start + length - offset
    } else {
        start + offset
    }
}

fn value_fraction(value: f64, axis: &Axis) -> ChartResult<f64> {
    if !value.is_finite() {
        return Err(ChartError::InvalidConfig("value must be finite".to_owned()));
    }

    let transformed = match axis.kind() {
        AxisKind::Logarithmic => {
            if value <= 0.0 {
                return Err(ChartError::Domain { value });
            }
            value.log(axis.log_base())
        }
        _ => value,
    };

    let visible = axis.visible_range();
    if visible.delta() <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "visible range is degenerate".to_owned(),
        ));
    }
    Ok((transformed - visible.minimum()) / visible.delta())
}

fn category_index(value: f64, category_count: usize) -> ChartResult<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "category value must be a non-negative integer index, got {value}"
        )));
    }
    let index = value as usize;
    if index >= category_count {
        return Err(ChartError::InvalidConfig(format!(
            "category index {index} out of bounds for {category_count} categories"
        )));
    }
    Ok(index)
}
