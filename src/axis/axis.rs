use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::axis::range::{Range, RangeOptions, compute_range, validate_zoom};
use crate::axis::time::{CalendarUnit, compute_time_range};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisKind {
    #[default]
    Double,
    DateTime,
    Category,
    Logarithmic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Axis entity owned by one chart instance.
///
/// Holds the actual (unzoomed) range, the cached post-zoom visible range, and
/// the ordered tick label strings. Mutated only during the measuring phase or
/// by a zoom/pan interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    kind: AxisKind,
    orientation: Orientation,
    range: Range,
    visible: Range,
    zoom_factor: f64,
    zoom_position: f64,
    labels: Vec<String>,
    log_base: f64,
    inverted: bool,
    calendar_unit: Option<CalendarUnit>,
}

impl Axis {
    /// Builds a linear numeric axis from raw values.
    pub fn numeric(
        orientation: Orientation,
        values: &[f64],
        options: RangeOptions,
    ) -> ChartResult<Self> {
        let range = compute_range(values, options)?;
        let labels = numeric_labels(range);
        Ok(Self::from_parts(AxisKind::Double, orientation, range, labels, 10.0, None))
    }

    /// Builds a date-time axis with calendar-unit tick intervals.
    pub fn date_time(
        orientation: Orientation,
        times: &[DateTime<Utc>],
        options: RangeOptions,
    ) -> ChartResult<Self> {
        let range = compute_time_range(times, options)?;
        let unit = crate::axis::time::select_calendar_interval(
            range.delta(),
            options.desired_interval_count.max(1),
        )?
        .0;
        let labels = time_labels(range, unit);
        Ok(Self::from_parts(
            AxisKind::DateTime,
            orientation,
            range,
            labels,
            10.0,
            Some(unit),
        ))
    }

    /// Builds a category axis over an ordered label sequence.
    pub fn category(orientation: Orientation, categories: Vec<String>) -> ChartResult<Self> {
        if categories.is_empty() {
            return Err(ChartError::EmptyData);
        }
        let last = (categories.len() - 1) as f64;
        let range = Range::new(0.0, last.max(0.0), 1.0)?;
        Ok(Self::from_parts(
            AxisKind::Category,
            orientation,
            range,
            categories,
            10.0,
            None,
        ))
    }

    /// Builds a logarithmic axis; the range lives in exponent space.
    ///
    /// Non-positive values cannot contribute to a log range and are skipped
    /// here; projection later marks such points empty.
    pub fn logarithmic(
        orientation: Orientation,
        values: &[f64],
        options: RangeOptions,
        log_base: f64,
    ) -> ChartResult<Self> {
        if !log_base.is_finite() || log_base <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "log base must be finite and > 1".to_owned(),
            ));
        }

        let exponents: Vec<f64> = values
            .iter()
            .copied()
            .filter(|value| *value > 0.0)
            .map(|value| value.log(log_base))
            .collect();
        let range = compute_range(&exponents, options)?;
        let labels = log_labels(range, log_base);
        Ok(Self::from_parts(
            AxisKind::Logarithmic,
            orientation,
            range,
            labels,
            log_base,
            None,
        ))
    }

    fn from_parts(
        kind: AxisKind,
        orientation: Orientation,
        range: Range,
        labels: Vec<String>,
        log_base: f64,
        calendar_unit: Option<CalendarUnit>,
    ) -> Self {
        Self {
            kind,
            orientation,
            range,
            visible: range,
            zoom_factor: 1.0,
            zoom_position: 0.0,
            labels,
            log_base,
            inverted: false,
            calendar_unit,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The actual, unzoomed range.
    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    /// The post-zoom range actually displayed.
    #[must_use]
    pub fn visible_range(&self) -> Range {
        self.visible
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn log_base(&self) -> f64 {
        self.log_base
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    #[must_use]
    pub fn zoom(&self) -> (f64, f64) {
        (self.zoom_factor, self.zoom_position)
    }

    /// Applies a zoom window and recomputes the cached visible range.
    pub fn set_zoom(&mut self, factor: f64, position: f64) -> ChartResult<()> {
        validate_zoom(factor, position)?;
        self.visible = self.range.zoomed(factor, position)?;
        self.zoom_factor = factor;
        self.zoom_position = position;
        Ok(())
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_factor = 1.0;
        self.zoom_position = 0.0;
        self.visible = self.range;
    }
}

fn numeric_labels(range: Range) -> Vec<String> {
    range
        .tick_values()
        .into_iter()
        .map(format_tick_value)
        .collect()
}

fn log_labels(range: Range, log_base: f64) -> Vec<String> {
    range
        .tick_values()
        .into_iter()
        .map(|exponent| format_tick_value(log_base.powf(exponent)))
        .collect()
}

fn time_labels(range: Range, unit: CalendarUnit) -> Vec<String> {
    let pattern = match unit {
        CalendarUnit::Years => "%Y",
        CalendarUnit::Months => "%Y-%m",
        CalendarUnit::Days => "%Y-%m-%d",
        CalendarUnit::Hours | CalendarUnit::Minutes => "%H:%M",
        CalendarUnit::Seconds => "%H:%M:%S",
    };

    range
        .tick_values()
        .into_iter()
        .map(|seconds| {
            let millis = (seconds * 1000.0).round() as i64;
            match Utc.timestamp_millis_opt(millis) {
                chrono::LocalResult::Single(time) => time.format(pattern).to_string(),
                _ => format_tick_value(seconds),
            }
        })
        .collect()
}

/// Formats a tick value without trailing noise: integers render bare, the
/// rest keep up to three fractional digits.
fn format_tick_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 && value.abs() < 1e15 {
        format!("{}", value.round() as i64)
    } else {
        let formatted = format!("{value:.3}");
        formatted.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}
