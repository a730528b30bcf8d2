//! Axis range and interval engine.

mod axis;
pub mod range;
pub mod time;

pub use axis::{Axis, AxisKind, Orientation};
pub use range::{
    MAX_DENSITY_RETRIES, Range, RangeOptions, compute_pruned_range, compute_range, nice_interval,
};
pub use time::{CalendarUnit, compute_time_range, datetime_to_unix_seconds, select_calendar_interval};
