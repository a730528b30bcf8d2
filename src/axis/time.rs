use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::range::{Range, RangeOptions, extend_to_tick, nice_interval};
use crate::error::{ChartError, ChartResult};

/// Calendar units tried smallest-first when selecting a date-time tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl CalendarUnit {
    /// Unit length in seconds; months and years use Gregorian mean lengths.
    #[must_use]
    pub fn seconds(self) -> f64 {
        match self {
            CalendarUnit::Seconds => 1.0,
            CalendarUnit::Minutes => 60.0,
            CalendarUnit::Hours => 3_600.0,
            CalendarUnit::Days => 86_400.0,
            CalendarUnit::Months => 2_629_746.0,
            CalendarUnit::Years => 31_556_952.0,
        }
    }

    const ORDERED: [CalendarUnit; 6] = [
        CalendarUnit::Seconds,
        CalendarUnit::Minutes,
        CalendarUnit::Hours,
        CalendarUnit::Days,
        CalendarUnit::Months,
        CalendarUnit::Years,
    ];
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Selects a tick interval (in seconds) for a date-time span.
///
/// Units are tried smallest-first; the first one whose single-step tick count
/// stays within `desired_interval_count * 1.5` wins. Spans too long even for
/// single-year steps fall back to nice multiples of years.
pub fn select_calendar_interval(
    span_seconds: f64,
    desired_interval_count: usize,
) -> ChartResult<(CalendarUnit, f64)> {
    if !span_seconds.is_finite() || span_seconds <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "date-time span must be finite and > 0".to_owned(),
        ));
    }
    if desired_interval_count == 0 {
        return Err(ChartError::InvalidConfig(
            "desired interval count must be >= 1".to_owned(),
        ));
    }

    let budget = desired_interval_count as f64 * 1.5;
    for unit in CalendarUnit::ORDERED {
        let ticks = span_seconds / unit.seconds();
        if ticks <= budget {
            debug!(?unit, ticks, "selected calendar interval");
            return Ok((unit, unit.seconds()));
        }
    }

    let span_years = span_seconds / CalendarUnit::Years.seconds();
    let year_multiple = nice_interval(span_years / desired_interval_count as f64);
    debug!(year_multiple, "span exceeds single-year steps, using year multiples");
    Ok((
        CalendarUnit::Years,
        year_multiple * CalendarUnit::Years.seconds(),
    ))
}

/// Computes an axis range over date-time values, with calendar-unit intervals
/// in place of the numeric nice-number table.
pub fn compute_time_range(
    times: &[DateTime<Utc>],
    options: RangeOptions,
) -> ChartResult<Range> {
    let options = options.validate()?;
    if times.is_empty() && (options.explicit_minimum.is_none() || options.explicit_maximum.is_none())
    {
        return Err(ChartError::EmptyData);
    }

    let mut minimum = f64::INFINITY;
    let mut maximum = f64::NEG_INFINITY;
    for &time in times {
        let seconds = datetime_to_unix_seconds(time);
        minimum = minimum.min(seconds);
        maximum = maximum.max(seconds);
    }

    if let Some(explicit) = options.explicit_minimum {
        minimum = explicit;
    }
    if let Some(explicit) = options.explicit_maximum {
        maximum = explicit;
    }
    if minimum > maximum {
        return Err(ChartError::InvalidRange { minimum, maximum });
    }

    // A single timestamp spans one minute centered on itself.
    if minimum == maximum {
        minimum -= 30.0;
        maximum += 30.0;
    }

    let (_, interval) = select_calendar_interval(maximum - minimum, options.desired_interval_count)?;
    let maximum = extend_to_tick(minimum, maximum, interval);
    Range::new(minimum, maximum, interval)
}
