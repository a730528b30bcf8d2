use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Nice-number multipliers tried in order when rounding a raw interval up.
const NICE_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Retry cap for label-density pruning before overflow is accepted and
/// downstream collision policy hides labels.
pub const MAX_DENSITY_RETRIES: u32 = 3;

/// Closed numeric span with its tick interval.
///
/// Immutable once published to layout; the measuring pass builds a fresh one
/// per axis on every run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    minimum: f64,
    maximum: f64,
    interval: f64,
}

impl Range {
    pub fn new(minimum: f64, maximum: f64, interval: f64) -> ChartResult<Self> {
        if !minimum.is_finite() || !maximum.is_finite() || minimum > maximum {
            return Err(ChartError::InvalidRange { minimum, maximum });
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "range interval must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            minimum,
            maximum,
            interval,
        })
    }

    /// Default range used when rendering degrades after [`ChartError::EmptyData`].
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
            interval: 0.2,
        }
    }

    #[must_use]
    pub fn minimum(self) -> f64 {
        self.minimum
    }

    #[must_use]
    pub fn maximum(self) -> f64 {
        self.maximum
    }

    #[must_use]
    pub fn interval(self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.maximum - self.minimum
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.minimum && value <= self.maximum
    }

    /// Tick values at `minimum, minimum + interval, ..` through `maximum`.
    #[must_use]
    pub fn tick_values(self) -> Vec<f64> {
        // Half-interval slack absorbs accumulated floating-point drift.
        let slack = self.interval * 1e-9;
        let mut ticks = Vec::new();
        let mut tick = self.minimum;
        while tick <= self.maximum + slack {
            ticks.push(tick);
            tick += self.interval;
        }
        ticks
    }

    /// Applies a zoom window to this range.
    ///
    /// `visible_min = minimum + position * delta`, `visible_max = visible_min
    /// + factor * delta`, both clamped back into the actual range. The tick
    /// interval is preserved.
    pub fn zoomed(self, factor: f64, position: f64) -> ChartResult<Self> {
        validate_zoom(factor, position)?;

        let visible_min = (self.minimum + position * self.delta()).min(self.maximum);
        let visible_max =
            (visible_min + factor * self.delta()).clamp(visible_min, self.maximum);

        Ok(Self {
            minimum: visible_min,
            maximum: visible_max,
            interval: self.interval,
        })
    }
}

pub(crate) fn validate_zoom(factor: f64, position: f64) -> ChartResult<()> {
    if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
        return Err(ChartError::InvalidConfig(
            "zoom factor must be finite and in (0, 1]".to_owned(),
        ));
    }
    if !position.is_finite() || !(0.0..=1.0).contains(&position) {
        return Err(ChartError::InvalidConfig(
            "zoom position must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}

/// Controls for [`compute_range`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeOptions {
    /// Force the minimum down to zero when all raw values are positive.
    pub start_from_zero: bool,
    /// Target number of tick intervals between minimum and maximum.
    pub desired_interval_count: usize,
    pub explicit_minimum: Option<f64>,
    pub explicit_maximum: Option<f64>,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            start_from_zero: false,
            desired_interval_count: 5,
            explicit_minimum: None,
            explicit_maximum: None,
        }
    }
}

impl RangeOptions {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if self.desired_interval_count == 0 {
            return Err(ChartError::InvalidConfig(
                "desired interval count must be >= 1".to_owned(),
            ));
        }
        for bound in [self.explicit_minimum, self.explicit_maximum].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ChartError::InvalidConfig(
                    "explicit range bounds must be finite".to_owned(),
                ));
            }
        }
        if let (Some(minimum), Some(maximum)) = (self.explicit_minimum, self.explicit_maximum) {
            if minimum > maximum {
                return Err(ChartError::InvalidRange { minimum, maximum });
            }
        }
        Ok(self)
    }
}

/// Computes the actual axis range for a numeric value sequence.
///
/// Non-finite values are skipped; a sequence with no finite values at all is
/// an [`ChartError::EmptyData`] error. The tick interval is the raw interval
/// `delta / desired_interval_count` rounded up to the nearest nice number,
/// and the maximum is extended outward so the last tick covers it.
pub fn compute_range(values: &[f64], options: RangeOptions) -> ChartResult<Range> {
    let options = options.validate()?;
    let (minimum, maximum) = resolve_bounds(values, options)?;
    build_nice_range(minimum, maximum, options.desired_interval_count)
}

/// [`compute_range`] with label-density pruning.
///
/// When the generated tick count would overflow the label capacity of the
/// available pixel length, the desired interval count is halved and the range
/// recomputed, at most [`MAX_DENSITY_RETRIES`] times. After the cap the
/// overflowing range is accepted.
pub fn compute_pruned_range(
    values: &[f64],
    options: RangeOptions,
    available_px: f64,
    max_labels_per_100px: f64,
) -> ChartResult<Range> {
    let options = options.validate()?;
    if !available_px.is_finite() || available_px <= 0.0 {
        return Err(ChartError::InvalidViewport {
            width: available_px,
            height: 0.0,
        });
    }
    if !max_labels_per_100px.is_finite() || max_labels_per_100px <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "max labels per 100px must be finite and > 0".to_owned(),
        ));
    }

    // Always allow at least the two endpoint labels.
    let allowed = ((available_px / 100.0) * max_labels_per_100px).floor().max(2.0) as usize;

    let mut attempt = options;
    let mut range = compute_range(values, attempt)?;

    for retry in 0..MAX_DENSITY_RETRIES {
        let tick_count = range.tick_values().len();
        if tick_count <= allowed {
            return Ok(range);
        }

        attempt.desired_interval_count = (attempt.desired_interval_count / 2).max(1);
        debug!(
            retry = retry + 1,
            tick_count,
            allowed,
            desired_interval_count = attempt.desired_interval_count,
            "label density overflow, retrying with coarser interval"
        );
        range = compute_range(values, attempt)?;
    }

    if range.tick_values().len() > allowed {
        debug!(
            allowed,
            tick_count = range.tick_values().len(),
            "density retries exhausted, accepting label overflow"
        );
    }
    Ok(range)
}

fn resolve_bounds(values: &[f64], options: RangeOptions) -> ChartResult<(f64, f64)> {
    let scanned = match (options.explicit_minimum, options.explicit_maximum) {
        (Some(_), Some(_)) => None,
        _ => Some(scan_finite_bounds(values)?),
    };

    let mut minimum = match options.explicit_minimum {
        Some(explicit) => explicit,
        None => scanned.map(|(low, _)| low).unwrap_or_default(),
    };
    let maximum = match options.explicit_maximum {
        Some(explicit) => explicit,
        None => scanned.map(|(_, high)| high).unwrap_or_default(),
    };

    if minimum > maximum {
        return Err(ChartError::InvalidRange { minimum, maximum });
    }

    if options.start_from_zero && options.explicit_minimum.is_none() && minimum > 0.0 {
        minimum = 0.0;
    }

    Ok((minimum, maximum))
}

fn scan_finite_bounds(values: &[f64]) -> ChartResult<(f64, f64)> {
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;

    for &value in values {
        if !value.is_finite() {
            continue;
        }
        low = low.min(value);
        high = high.max(value);
    }

    if low > high {
        return Err(ChartError::EmptyData);
    }
    Ok((low, high))
}

pub(crate) fn build_nice_range(
    minimum: f64,
    maximum: f64,
    desired_interval_count: usize,
) -> ChartResult<Range> {
    let (minimum, maximum) = expand_degenerate(minimum, maximum);

    let raw_interval = (maximum - minimum) / desired_interval_count as f64;
    let interval = nice_interval(raw_interval);
    let maximum = extend_to_tick(minimum, maximum, interval);

    debug!(minimum, maximum, interval, "computed axis range");
    Range::new(minimum, maximum, interval)
}

fn expand_degenerate(minimum: f64, maximum: f64) -> (f64, f64) {
    if minimum < maximum {
        return (minimum, maximum);
    }
    let pad = if minimum == 0.0 {
        0.5
    } else {
        minimum.abs() * 0.5
    };
    (minimum - pad, maximum + pad)
}

/// Rounds a raw interval up to the nearest `{1, 2, 2.5, 5, 10} * 10^n`.
#[must_use]
pub fn nice_interval(raw_interval: f64) -> f64 {
    if !raw_interval.is_finite() || raw_interval <= 0.0 {
        return 1.0;
    }

    let magnitude = 10f64.powf(raw_interval.log10().floor());
    for multiplier in NICE_MULTIPLIERS {
        let candidate = multiplier * magnitude;
        if candidate >= raw_interval - candidate * 1e-12 {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Extends `maximum` so that `minimum + k * interval` covers it exactly.
pub(crate) fn extend_to_tick(minimum: f64, maximum: f64, interval: f64) -> f64 {
    let steps = (maximum - minimum) / interval;
    let whole = steps.round();
    // Exact multiple within floating-point tolerance keeps the raw maximum.
    if (steps - whole).abs() <= steps.abs() * 1e-9 + 1e-12 {
        return minimum + whole * interval;
    }
    minimum + steps.ceil() * interval
}
